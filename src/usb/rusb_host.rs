//! rusb-backed host implementation
//!
//! Wraps `rusb::Device` with a cached descriptor and maps libusb failures
//! into the crate error taxonomy.

use crate::usb::host::{DeviceAccess, DeviceRecord, UsbHost};
use crate::{Error, Result};
use rusb::{Context, Device, DeviceDescriptor, DeviceHandle, UsbContext};
use tracing::{debug, warn};

/// Production USB host backed by a libusb context.
pub struct RusbHost {
    context: Context,
}

impl RusbHost {
    /// Initialize the libusb context. Call once per process.
    pub fn new() -> Result<Self> {
        let context = Context::new().map_err(|e| Error::Usb(e.to_string()))?;
        Ok(Self { context })
    }
}

impl UsbHost for RusbHost {
    type Device = RusbDevice;
    type Handle = RusbHandle;

    fn devices(&self) -> Result<Vec<RusbDevice>> {
        let list = self
            .context
            .devices()
            .map_err(|e| Error::Usb(e.to_string()))?;

        let mut devices = Vec::new();
        for device in list.iter() {
            match RusbDevice::new(device) {
                Ok(record) => devices.push(record),
                // Descriptor reads can fail for devices we lack permission
                // to query; skip them rather than abort enumeration.
                Err(e) => warn!("Skipping device with unreadable descriptor: {}", e),
            }
        }

        debug!("Enumerated {} devices", devices.len());
        Ok(devices)
    }

    fn open(&self, device: &RusbDevice) -> Result<RusbHandle> {
        let handle = device.device.open().map_err(|e| {
            warn!("Failed to open device: {}", e);
            Error::OpenFailed(e.to_string())
        })?;

        debug!(
            "Opened device {:04x}:{:04x}",
            device.vendor_id(),
            device.product_id()
        );
        Ok(RusbHandle { handle })
    }
}

/// USB device wrapper with a cached descriptor.
pub struct RusbDevice {
    device: Device<Context>,
    descriptor: DeviceDescriptor,
}

impl RusbDevice {
    fn new(device: Device<Context>) -> std::result::Result<Self, rusb::Error> {
        let descriptor = device.device_descriptor()?;
        Ok(Self { device, descriptor })
    }

    pub fn bus_number(&self) -> u8 {
        self.device.bus_number()
    }

    pub fn address(&self) -> u8 {
        self.device.address()
    }
}

impl DeviceRecord for RusbDevice {
    fn vendor_id(&self) -> u16 {
        self.descriptor.vendor_id()
    }

    fn product_id(&self) -> u16 {
        self.descriptor.product_id()
    }

    fn num_configurations(&self) -> u8 {
        self.descriptor.num_configurations()
    }
}

/// Open device handle. The underlying libusb handle closes on drop.
pub struct RusbHandle {
    handle: DeviceHandle<Context>,
}

impl DeviceAccess for RusbHandle {
    fn reset(&mut self) -> Result<()> {
        self.handle
            .reset()
            .map_err(|e| Error::Usb(e.to_string()))?;
        debug!("Reset device");
        Ok(())
    }

    fn set_configuration(&mut self, configuration: u8) -> Result<()> {
        self.handle
            .set_active_configuration(configuration)
            .map_err(|e| Error::ConfigurationSwitchFailed(e.to_string()))?;
        debug!("Set configuration #{}", configuration);
        Ok(())
    }
}
