//! Audio input device enumeration.

use cpal::traits::{DeviceTrait, HostTrait};

use crate::error::PipelineError;

#[derive(Debug, Clone)]
pub struct AudioDeviceInfo {
    pub name: String,
    pub is_default: bool,
}

/// List input devices, marking the system default.
///
/// # Errors
/// Returns DeviceUnavailable when no input device exists at all.
pub fn list_input_devices() -> Result<Vec<AudioDeviceInfo>, PipelineError> {
    let host = cpal::default_host();
    let default_name = host.default_input_device().and_then(|d| d.name().ok());

    let mut devices = Vec::new();
    let iter = host
        .input_devices()
        .map_err(|e| PipelineError::DeviceUnavailable(e.to_string()))?;
    for device in iter {
        if let Ok(name) = device.name() {
            devices.push(AudioDeviceInfo {
                is_default: default_name.as_ref() == Some(&name),
                name,
            });
        }
    }

    if devices.is_empty() {
        return Err(PipelineError::DeviceUnavailable(
            "no audio input devices found".to_string(),
        ));
    }

    Ok(devices)
}
