//! USB host access
//!
//! [`host`] defines the capability traits the switch procedure consumes;
//! [`rusb_host`] implements them over libusb via the `rusb` crate.

pub mod host;
pub mod rusb_host;

pub use host::{DeviceAccess, DeviceRecord, UsbHost};
pub use rusb_host::RusbHost;
