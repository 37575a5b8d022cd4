//! Configuration types

use std::time::Duration;

use ledgrid_core::{Color, DEFAULT_GRID_SIZE};
use serde::{Deserialize, Serialize};

/// Lower bound for the poll interval
pub const MIN_POLL_INTERVAL_MS: u64 = 100;

/// Lower bound for the per-request timeout
pub const MIN_REQUEST_TIMEOUT_MS: u64 = 100;

/// Application settings (config.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub device: DeviceSettings,

    #[serde(default)]
    pub sync: SyncSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Where the device lives and how to talk to it
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DeviceSettings {
    /// Base URL of the device or of a relay in front of it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout; expiry counts as unreachable
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Side length of the LED matrix
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
            grid_size: default_grid_size(),
        }
    }
}

impl DeviceSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.max(MIN_REQUEST_TIMEOUT_MS))
    }
}

/// Polling behaviour
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SyncSettings {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Consecutive poll failures before the status line reports it
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            failure_threshold: default_failure_threshold(),
        }
    }
}

impl SyncSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }
}

/// Status line and color picker
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    #[serde(default = "default_status_duration_ms")]
    pub status_duration_ms: u64,

    /// Color selected at startup
    #[serde(default = "default_color")]
    pub default_color: Color,

    /// Colors reachable with `[`, `]` and `1`-`9`
    #[serde(default = "default_palette")]
    pub palette: Vec<Color>,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            status_duration_ms: default_status_duration_ms(),
            default_color: default_color(),
            palette: default_palette(),
        }
    }
}

impl UiSettings {
    pub fn status_duration(&self) -> Duration {
        Duration::from_millis(self.status_duration_ms)
    }
}

fn default_base_url() -> String {
    "http://192.168.4.1".to_string()
}

fn default_request_timeout_ms() -> u64 {
    3000
}

fn default_grid_size() -> usize {
    DEFAULT_GRID_SIZE
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_failure_threshold() -> u32 {
    3
}

fn default_status_duration_ms() -> u64 {
    3000
}

fn default_color() -> Color {
    Color::WHITE
}

fn default_palette() -> Vec<Color> {
    vec![
        Color::WHITE,
        Color::new(0xff, 0x00, 0x00),
        Color::new(0xff, 0x80, 0x00),
        Color::new(0xff, 0xff, 0x00),
        Color::new(0x00, 0xff, 0x00),
        Color::new(0x00, 0xff, 0xff),
        Color::new(0x00, 0x00, 0xff),
        Color::new(0xff, 0x00, 0xff),
        Color::BLACK,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.device.base_url, "http://192.168.4.1");
        assert_eq!(settings.device.request_timeout(), Duration::from_secs(3));
        assert_eq!(settings.device.grid_size, 8);
        assert_eq!(settings.sync.poll_interval(), Duration::from_secs(1));
        assert_eq!(settings.sync.failure_threshold, 3);
        assert_eq!(settings.ui.status_duration(), Duration::from_secs(3));
        assert_eq!(settings.ui.palette.len(), 9);
    }

    #[test]
    fn test_intervals_are_clamped() {
        let sync = SyncSettings {
            poll_interval_ms: 5,
            failure_threshold: 3,
        };
        assert_eq!(sync.poll_interval(), Duration::from_millis(MIN_POLL_INTERVAL_MS));

        let device = DeviceSettings {
            request_timeout_ms: 0,
            ..Default::default()
        };
        assert_eq!(
            device.request_timeout(),
            Duration::from_millis(MIN_REQUEST_TIMEOUT_MS)
        );
    }

    #[test]
    fn test_partial_section_uses_field_defaults() {
        let settings: Settings = toml::from_str("[sync]\npoll_interval_ms = 250\n").unwrap();
        assert_eq!(settings.sync.poll_interval_ms, 250);
        assert_eq!(settings.sync.failure_threshold, 3);
        assert_eq!(settings.device, DeviceSettings::default());
    }

    #[test]
    fn test_palette_parses_hex_strings() {
        let settings: Settings =
            toml::from_str("[ui]\npalette = [\"#ff0000\", \"00FF00\"]\ndefault_color = \"#123456\"\n")
                .unwrap();
        assert_eq!(
            settings.ui.palette,
            vec![Color::new(255, 0, 0), Color::new(0, 255, 0)]
        );
        assert_eq!(settings.ui.default_color, Color::new(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_bad_palette_entry_fails_to_parse() {
        let parsed: Result<Settings, _> = toml::from_str("[ui]\npalette = [\"red\"]\n");
        assert!(parsed.is_err());
    }
}
