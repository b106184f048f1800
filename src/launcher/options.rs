// src/launcher/options.rs

//! Mirror command construction.

use serde::Deserialize;

/// Options rendered into the `scrcpy` command line.
///
/// Doubles as the `[mirror]` table of `Mirrorctl.toml`. Unset fields are
/// omitted from the command; the device selection flag is always present
/// (`--serial=<s>` when a serial is set, `--select-usb` otherwise).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct MirrorOptions {
    /// Video bit rate, e.g. "8M".
    pub video_bit_rate: Option<String>,
    /// Frame-rate cap.
    pub max_fps: Option<u32>,
    pub window_title: Option<String>,
    /// Longest-side resolution cap in pixels.
    pub max_size: Option<u32>,
    pub render_driver: Option<String>,
    /// Show the FPS counter on the console.
    pub print_fps: bool,
    /// Device serial; when unset the single USB device is selected.
    pub serial: Option<String>,
}

impl Default for MirrorOptions {
    fn default() -> Self {
        Self {
            video_bit_rate: None,
            max_fps: None,
            window_title: None,
            max_size: None,
            render_driver: Some("opengl".to_string()),
            print_fps: false,
            serial: None,
        }
    }
}

impl MirrorOptions {
    /// Render the full `scrcpy` invocation.
    pub fn to_command(&self) -> String {
        let mut parts = vec!["scrcpy".to_string()];

        if let Some(rate) = &self.video_bit_rate {
            parts.push(format!("--video-bit-rate {rate}"));
        }
        if let Some(fps) = self.max_fps {
            parts.push(format!("--max-fps {fps}"));
        }
        if let Some(title) = self.window_title.as_deref().map(str::trim) {
            if !title.is_empty() {
                parts.push(format!("--window-title \"{title}\""));
            }
        }
        if let Some(size) = self.max_size {
            parts.push(format!("--max-size {size}"));
        }
        if let Some(driver) = &self.render_driver {
            parts.push(format!("--render-driver={driver}"));
        }
        if self.print_fps {
            parts.push("--print-fps".to_string());
        }
        match self.serial.as_deref() {
            Some(serial) if !serial.is_empty() => parts.push(format!("--serial={serial}")),
            _ => parts.push("--select-usb".to_string()),
        }

        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_select_usb_with_opengl() {
        assert_eq!(
            MirrorOptions::default().to_command(),
            "scrcpy --render-driver=opengl --select-usb"
        );
    }

    #[test]
    fn all_options_render_in_stable_order() {
        let options = MirrorOptions {
            video_bit_rate: Some("8M".to_string()),
            max_fps: Some(90),
            window_title: Some("POCO X5 5G".to_string()),
            max_size: Some(1600),
            render_driver: Some("opengl".to_string()),
            print_fps: true,
            serial: Some("abc123".to_string()),
        };
        assert_eq!(
            options.to_command(),
            "scrcpy --video-bit-rate 8M --max-fps 90 --window-title \"POCO X5 5G\" \
             --max-size 1600 --render-driver=opengl --print-fps --serial=abc123"
        );
    }

    #[test]
    fn blank_window_title_is_omitted() {
        let options = MirrorOptions {
            window_title: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(!options.to_command().contains("--window-title"));
    }

    #[test]
    fn empty_serial_falls_back_to_usb_selection() {
        let options = MirrorOptions {
            serial: Some(String::new()),
            ..Default::default()
        };
        assert!(options.to_command().ends_with("--select-usb"));
    }

    #[test]
    fn deserializes_from_config_table() {
        let options: MirrorOptions = toml::from_str(
            r#"
            video_bit_rate = "12M"
            max_fps = 60
            print_fps = true
            "#,
        )
        .unwrap();
        assert_eq!(options.video_bit_rate.as_deref(), Some("12M"));
        assert_eq!(options.max_fps, Some(60));
        assert!(options.print_fps);
        // Defaults still apply to everything unset.
        assert_eq!(options.render_driver.as_deref(), Some("opengl"));
    }
}
