//! Host USB access traits
//!
//! The switch procedure only needs to enumerate devices, read three
//! descriptor fields, open one device, and issue reset/set-configuration on
//! the handle. Modelling that as traits keeps the matcher a pure function of
//! an enumerated snapshot and lets tests substitute a scripted host.

use crate::Result;

/// A device as reported by enumeration. Read-only descriptor fields.
pub trait DeviceRecord {
    fn vendor_id(&self) -> u16;
    fn product_id(&self) -> u16;
    fn num_configurations(&self) -> u8;
}

/// An open, exclusively held device handle.
///
/// The handle is released when the value is dropped, so every exit path out
/// of the switch procedure closes the device.
pub trait DeviceAccess {
    /// Issue a USB port reset on the device.
    fn reset(&mut self) -> Result<()>;

    /// Issue a SET_CONFIGURATION control request.
    fn set_configuration(&mut self, configuration: u8) -> Result<()>;
}

/// The host USB layer.
pub trait UsbHost {
    type Device: DeviceRecord;
    type Handle: DeviceAccess;

    /// Refresh the bus/device topology and return a snapshot of it, in host
    /// enumeration order.
    fn devices(&self) -> Result<Vec<Self::Device>>;

    /// Open a device for exclusive access.
    fn open(&self, device: &Self::Device) -> Result<Self::Handle>;
}
