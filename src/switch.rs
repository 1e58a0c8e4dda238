//! Device matching and the configuration switch procedure
//!
//! The procedure is linear: refresh, match, verify, open, reset, set
//! configuration, close. No retries; the first failure ends the run. The
//! handle closes on drop, including on the set-configuration failure path.

use crate::usb::host::{DeviceAccess, DeviceRecord, UsbHost};
use crate::{Error, Result};
use tracing::{info, warn};

/// This VID/PID pair is OK for all the Samsung phones tested; other device
/// families need different values.
pub const SAMSUNG_VENDOR_ID: u16 = 0x04e8;
pub const SAMSUNG_PRODUCT_ID: u16 = 0x6860;

/// Configuration index the device is switched to.
pub const TARGET_CONFIGURATION: u8 = 2;

/// The switch to configuration #2 only makes sense on hardware that exposes
/// exactly two alternate configurations.
pub const EXPECTED_CONFIGURATIONS: u8 = 2;

/// The device to find and the configuration to switch it to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchTarget {
    pub vendor_id: u16,
    pub product_id: u16,
    pub configuration: u8,
}

impl Default for SwitchTarget {
    fn default() -> Self {
        Self {
            vendor_id: SAMSUNG_VENDOR_ID,
            product_id: SAMSUNG_PRODUCT_ID,
            configuration: TARGET_CONFIGURATION,
        }
    }
}

/// Find the first device matching the VID/PID pair, in enumeration order.
pub fn find_device<D: DeviceRecord>(devices: &[D], vendor_id: u16, product_id: u16) -> Option<&D> {
    devices
        .iter()
        .find(|d| d.vendor_id() == vendor_id && d.product_id() == product_id)
}

/// Run the full switch procedure against the given host.
pub fn switch_configuration<H: UsbHost>(host: &H, target: &SwitchTarget) -> Result<()> {
    let devices = host.devices()?;

    let device = find_device(&devices, target.vendor_id, target.product_id).ok_or(
        Error::DeviceNotFound {
            vendor_id: target.vendor_id,
            product_id: target.product_id,
        },
    )?;

    let configurations = device.num_configurations();
    info!("Device found, {} configuration(s)", configurations);

    // Hardware assumption check: refuse to touch a device that does not
    // expose the expected two configurations.
    if configurations != EXPECTED_CONFIGURATIONS {
        return Err(Error::UnexpectedConfigurationCount {
            expected: EXPECTED_CONFIGURATIONS,
            found: configurations,
        });
    }

    let mut handle = host.open(device)?;
    info!(
        "Device opened, switching to configuration #{}",
        target.configuration
    );

    // The reference tool ignores the reset result; a failed reset does not
    // stop the switch attempt.
    if let Err(e) = handle.reset() {
        warn!("Device reset failed: {}", e);
    }

    handle.set_configuration(target.configuration)?;

    info!("Configuration switched!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct FakeDevice {
        vendor_id: u16,
        product_id: u16,
        num_configurations: u8,
    }

    impl DeviceRecord for FakeDevice {
        fn vendor_id(&self) -> u16 {
            self.vendor_id
        }

        fn product_id(&self) -> u16 {
            self.product_id
        }

        fn num_configurations(&self) -> u8 {
            self.num_configurations
        }
    }

    fn dev(vendor_id: u16, product_id: u16) -> FakeDevice {
        FakeDevice {
            vendor_id,
            product_id,
            num_configurations: 2,
        }
    }

    #[test]
    fn test_default_target_matches_reference() {
        let target = SwitchTarget::default();
        assert_eq!(target.vendor_id, 0x04e8);
        assert_eq!(target.product_id, 0x6860);
        assert_eq!(target.configuration, 2);
    }

    #[test]
    fn test_find_device_empty_list() {
        let devices: Vec<FakeDevice> = vec![];
        assert!(find_device(&devices, 0x04e8, 0x6860).is_none());
    }

    #[test]
    fn test_find_device_no_match() {
        let devices = vec![dev(0x1d6b, 0x0002), dev(0x046d, 0xc52b)];
        assert!(find_device(&devices, 0x04e8, 0x6860).is_none());
    }

    #[test]
    fn test_find_device_single_match_any_position() {
        for position in 0..3 {
            let mut devices = vec![dev(0x1d6b, 0x0002), dev(0x046d, 0xc52b)];
            devices.insert(position, dev(0x04e8, 0x6860));

            let found = find_device(&devices, 0x04e8, 0x6860).unwrap();
            assert_eq!(found.vendor_id, 0x04e8);
            assert_eq!(found.product_id, 0x6860);
        }
    }

    #[test]
    fn test_find_device_first_match_wins() {
        let first = FakeDevice {
            vendor_id: 0x04e8,
            product_id: 0x6860,
            num_configurations: 2,
        };
        let second = FakeDevice {
            vendor_id: 0x04e8,
            product_id: 0x6860,
            num_configurations: 3,
        };
        let devices = vec![dev(0x1d6b, 0x0002), first.clone(), second];

        let found = find_device(&devices, 0x04e8, 0x6860).unwrap();
        assert_eq!(*found, first);
    }

    #[test]
    fn test_find_device_partial_id_match_is_not_a_match() {
        // Same VID, different PID and the other way around.
        let devices = vec![dev(0x04e8, 0x1234), dev(0x1234, 0x6860)];
        assert!(find_device(&devices, 0x04e8, 0x6860).is_none());
    }

    proptest! {
        #[test]
        fn prop_no_match_in_non_target_lists(
            devices in prop::collection::vec((any::<u16>(), any::<u16>()), 0..16)
        ) {
            let devices: Vec<FakeDevice> = devices
                .into_iter()
                .filter(|&(v, p)| !(v == 0x04e8 && p == 0x6860))
                .map(|(v, p)| dev(v, p))
                .collect();

            prop_assert!(find_device(&devices, 0x04e8, 0x6860).is_none());
        }

        #[test]
        fn prop_single_match_found_regardless_of_position(
            others in prop::collection::vec((any::<u16>(), any::<u16>()), 0..16),
            position in any::<prop::sample::Index>(),
        ) {
            let mut devices: Vec<FakeDevice> = others
                .into_iter()
                .filter(|&(v, p)| !(v == 0x04e8 && p == 0x6860))
                .map(|(v, p)| dev(v, p))
                .collect();
            let position = position.index(devices.len() + 1);
            devices.insert(position, dev(0x04e8, 0x6860));

            let found = find_device(&devices, 0x04e8, 0x6860);
            prop_assert_eq!(found, Some(&devices[position]));
        }
    }
}
