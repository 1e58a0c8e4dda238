//! usbswitcher
//!
//! Search for an attached USB device (by default a Samsung phone,
//! 04e8:6860) and switch it to USB configuration #2.

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use usbswitcher::usb::{DeviceRecord, RusbHost, UsbHost};
use usbswitcher::{
    SwitchTarget, setup_logging, switch_configuration,
    switch::{SAMSUNG_PRODUCT_ID, SAMSUNG_VENDOR_ID, TARGET_CONFIGURATION},
};

#[derive(Parser, Debug)]
#[command(name = "usbswitcher")]
#[command(
    author,
    version,
    about = "Switch a USB device to an alternate configuration"
)]
#[command(long_about = "
Search for an attached USB device by vendor/product ID and switch it to an
alternate USB configuration.

EXAMPLES:
    # Switch the default target (Samsung, 04e8:6860) to configuration #2
    usbswitcher

    # Switch a different device
    usbswitcher --vid 0x04e8 --pid 0x685d

    # List attached devices without switching anything
    usbswitcher --list-devices
")]
struct Args {
    /// Vendor ID of the target device (hex with 0x prefix, or decimal)
    #[arg(long, value_parser = parse_usb_id, default_value = "0x04e8")]
    vid: u16,

    /// Product ID of the target device (hex with 0x prefix, or decimal)
    #[arg(long, value_parser = parse_usb_id, default_value = "0x6860")]
    pid: u16,

    /// Configuration index to switch to
    #[arg(long, default_value_t = TARGET_CONFIGURATION)]
    configuration: u8,

    /// List attached USB devices and exit
    #[arg(long)]
    list_devices: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

fn parse_usb_id(s: &str) -> std::result::Result<u16, String> {
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16)
    } else {
        s.parse()
    };
    parsed.map_err(|_| format!("invalid USB ID: {}", s))
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = setup_logging(&args.log_level) {
        eprintln!("Failed to setup logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let host = RusbHost::new().context("Failed to initialize USB host")?;

    if args.list_devices {
        return list_devices(&host);
    }

    let target = SwitchTarget {
        vendor_id: args.vid,
        product_id: args.pid,
        configuration: args.configuration,
    };

    if (target.vendor_id, target.product_id) != (SAMSUNG_VENDOR_ID, SAMSUNG_PRODUCT_ID) {
        info!(
            "Targeting non-default device {:04x}:{:04x}",
            target.vendor_id, target.product_id
        );
    }

    switch_configuration(&host, &target)?;
    Ok(())
}

fn list_devices(host: &RusbHost) -> Result<()> {
    let devices = host.devices()?;

    for device in &devices {
        println!(
            "Bus {:03} Device {:03}: {:04x}:{:04x}, {} configuration(s)",
            device.bus_number(),
            device.address(),
            device.vendor_id(),
            device.product_id(),
            device.num_configurations()
        );
    }

    info!("{} device(s) attached", devices.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_usb_id_hex() {
        assert_eq!(parse_usb_id("0x04e8").unwrap(), 0x04e8);
        assert_eq!(parse_usb_id("0X6860").unwrap(), 0x6860);
    }

    #[test]
    fn test_parse_usb_id_decimal() {
        assert_eq!(parse_usb_id("1256").unwrap(), 1256);
    }

    #[test]
    fn test_parse_usb_id_rejects_garbage() {
        assert!(parse_usb_id("").is_err());
        assert!(parse_usb_id("0x").is_err());
        assert!(parse_usb_id("samsung").is_err());
        assert!(parse_usb_id("0x10000").is_err());
    }

    #[test]
    fn test_args_defaults_match_reference_target() {
        let args = Args::parse_from(["usbswitcher"]);
        assert_eq!(args.vid, SAMSUNG_VENDOR_ID);
        assert_eq!(args.pid, SAMSUNG_PRODUCT_ID);
        assert_eq!(args.configuration, TARGET_CONFIGURATION);
        assert!(!args.list_devices);
    }
}
