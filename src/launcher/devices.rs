// src/launcher/devices.rs

//! `adb devices` invocation and output parsing.

use std::fmt;

use crate::errors::{MirrorctlError, Result};
use crate::supervisor::{ABNORMAL_EXIT, ChannelSink, CommandSpec, Supervisor, SupervisorEvent};

/// Connection state as reported by `adb devices`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceState {
    Device,
    Offline,
    Unauthorized,
    Other(String),
}

impl DeviceState {
    fn parse(raw: &str) -> Self {
        match raw {
            "device" => DeviceState::Device,
            "offline" => DeviceState::Offline,
            "unauthorized" => DeviceState::Unauthorized,
            other => DeviceState::Other(other.to_string()),
        }
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceState::Device => write!(f, "device"),
            DeviceState::Offline => write!(f, "offline"),
            DeviceState::Unauthorized => write!(f, "unauthorized"),
            DeviceState::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// One row of `adb devices` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub serial: String,
    pub state: DeviceState,
}

impl Device {
    /// Ready for use: shows as `device`, not `offline`/`unauthorized`.
    pub fn is_connected(&self) -> bool {
        self.state == DeviceState::Device
    }
}

/// Parse `adb devices` output.
///
/// Device rows are `serial<TAB>state`; the banner line and blank lines
/// carry no tab and are skipped. Never panics, whatever the input.
pub fn parse_device_list(output: &str) -> Vec<Device> {
    output
        .lines()
        .filter_map(|line| {
            let (serial, state) = line.split_once('\t')?;
            let serial = serial.trim();
            if serial.is_empty() {
                return None;
            }
            Some(Device {
                serial: serial.to_string(),
                state: DeviceState::parse(state.trim()),
            })
        })
        .collect()
}

/// Run `adb devices` under a supervisor and parse the result.
///
/// `base` supplies the prefix / tool-directory / working-directory context;
/// its command string is replaced with the device query. A non-zero exit
/// from the debug bridge becomes [`MirrorctlError::ToolFailed`].
pub async fn list_devices(base: &CommandSpec) -> Result<Vec<Device>> {
    let spec = base.clone().command("adb devices");
    let (sink, mut events) = ChannelSink::new();
    let _supervisor = Supervisor::spawn(&spec, sink)?;

    let mut captured = String::new();
    let code = loop {
        match events.recv().await {
            Some(SupervisorEvent::Output { line, is_error }) => {
                if !is_error {
                    captured.push_str(&line);
                    captured.push('\n');
                }
            }
            Some(SupervisorEvent::Completed { code }) => break code,
            None => break ABNORMAL_EXIT,
        }
    };

    if code != 0 {
        return Err(MirrorctlError::ToolFailed {
            command: "adb devices".to_string(),
            code,
        });
    }

    Ok(parse_device_list(&captured))
}
