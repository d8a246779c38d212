//! `murmur devices`: list input devices.

use anyhow::{Context, Result};
use console::style;
use murmur_core::audio::list_input_devices;

pub fn run() -> Result<()> {
    let devices = list_input_devices().context("Could not enumerate audio input devices")?;

    for device in devices {
        if device.is_default {
            println!("{} {} {}", style("*").green(), device.name, style("(default)").dim());
        } else {
            println!("  {}", device.name);
        }
    }
    Ok(())
}
