//! usbswitcher library
//!
//! Finds a USB device by vendor/product ID and switches it to an alternate
//! configuration via a control transfer. The host USB layer is behind the
//! traits in [`usb::host`] so the matching and switch logic can be tested
//! without hardware.

pub mod error;
pub mod logging;
pub mod switch;
pub mod usb;

pub use error::{Error, Result};
pub use logging::setup_logging;
pub use switch::{SwitchTarget, find_device, switch_configuration};
