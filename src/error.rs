//! Error types for the configuration switch procedure

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("device {vendor_id:04x}:{product_id:04x} not found")]
    DeviceNotFound { vendor_id: u16, product_id: u16 },

    #[error("can't open device: {0}")]
    OpenFailed(String),

    #[error("configuration switch failed: {0}")]
    ConfigurationSwitchFailed(String),

    #[error("expected {expected} configurations, device reports {found}")]
    UnexpectedConfigurationCount { expected: u8, found: u8 },

    #[error("USB error: {0}")]
    Usb(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
