//! Settings parser for config.toml

use std::path::{Path, PathBuf};

use super::types::Settings;
use ledgrid_core::prelude::*;
use ledgrid_core::{DEFAULT_GRID_SIZE, MAX_GRID_SIZE};

const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "ledgrid";

/// `<config dir>/ledgrid/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}

/// Load settings from `config_path`.
///
/// A missing or unparsable file yields defaults; this never fails.
pub fn load_settings(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                sanitize(settings)
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Replace values that would leave the app unusable.
pub fn sanitize(mut settings: Settings) -> Settings {
    if settings.device.grid_size == 0 {
        warn!("grid_size = 0 is invalid, using {}", DEFAULT_GRID_SIZE);
        settings.device.grid_size = DEFAULT_GRID_SIZE;
    } else if settings.device.grid_size > MAX_GRID_SIZE {
        warn!(
            "grid_size = {} is too large, using {}",
            settings.device.grid_size, MAX_GRID_SIZE
        );
        settings.device.grid_size = MAX_GRID_SIZE;
    }
    if settings.ui.palette.is_empty() {
        warn!("Empty palette, using default colors");
        settings.ui.palette = Settings::default().ui.palette;
    }
    if settings.sync.failure_threshold == 0 {
        settings.sync.failure_threshold = 1;
    }
    settings
}

/// Write a commented default config file if none exists at `config_path`.
///
/// Returns true if a file was created.
pub fn init_config_file(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(dir) = config_path.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|e| Error::config(format!("Failed to create {:?}: {}", dir, e)))?;
    }

    let temp_path = config_path.with_extension("toml.tmp");

    // Atomic write: write to temp, then rename
    std::fs::write(&temp_path, DEFAULT_CONFIG)
        .map_err(|e| Error::config(format!("Failed to write temp file: {}", e)))?;
    std::fs::rename(&temp_path, config_path)
        .map_err(|e| Error::config(format!("Failed to rename temp file: {}", e)))?;

    info!("Created default config at {:?}", config_path);
    Ok(true)
}

const DEFAULT_CONFIG: &str = r##"# LED grid controller configuration

[device]
base_url = "http://192.168.4.1"   # Device address, or a relay such as http://localhost:3000
request_timeout_ms = 3000         # Requests slower than this count as unreachable
grid_size = 8

[sync]
poll_interval_ms = 1000           # How often the full LED state is fetched
failure_threshold = 3             # Failed polls in a row before the status line says so

[ui]
status_duration_ms = 3000
default_color = "#ffffff"
palette = [
    "#ffffff", "#ff0000", "#ff8000", "#ffff00", "#00ff00",
    "#00ffff", "#0000ff", "#ff00ff", "#000000",
]
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_settings_defaults() {
        let temp = tempdir().unwrap();
        let settings = load_settings(&temp.path().join("config.toml"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_settings_custom() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        let config = r#"
[device]
base_url = "http://10.0.0.7"
request_timeout_ms = 500

[sync]
poll_interval_ms = 2000
"#;
        std::fs::write(&path, config).unwrap();

        let settings = load_settings(&path);

        assert_eq!(settings.device.base_url, "http://10.0.0.7");
        assert_eq!(settings.device.request_timeout_ms, 500);
        assert_eq!(settings.sync.poll_interval_ms, 2000);
        assert_eq!(settings.sync.failure_threshold, 3);
    }

    #[test]
    fn test_load_settings_invalid_toml() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[device\nbase_url = ").unwrap();

        assert_eq!(load_settings(&path), Settings::default());
    }

    #[test]
    fn test_sanitize_repairs_unusable_values() {
        let mut settings = Settings::default();
        settings.device.grid_size = 0;
        settings.ui.palette.clear();
        settings.sync.failure_threshold = 0;

        let fixed = sanitize(settings);
        assert_eq!(fixed.device.grid_size, 8);
        assert!(!fixed.ui.palette.is_empty());
        assert_eq!(fixed.sync.failure_threshold, 1);
    }

    #[test]
    fn test_sanitize_caps_oversized_grid() {
        let mut settings = Settings::default();
        settings.device.grid_size = 1 << 40;

        let fixed = sanitize(settings);
        assert_eq!(fixed.device.grid_size, MAX_GRID_SIZE);

        let state = crate::state::AppState::with_settings(fixed);
        assert_eq!(state.grid_size(), MAX_GRID_SIZE);
    }

    #[test]
    fn test_load_settings_caps_oversized_grid() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[device]\ngrid_size = 100000\n").unwrap();

        assert_eq!(load_settings(&path).device.grid_size, MAX_GRID_SIZE);
    }

    #[test]
    fn test_init_config_file_writes_loadable_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("ledgrid").join("config.toml");

        assert!(init_config_file(&path).unwrap());
        assert!(path.exists());
        assert_eq!(load_settings(&path), Settings::default());

        // Second call leaves the file alone
        std::fs::write(&path, "[sync]\npoll_interval_ms = 5000\n").unwrap();
        assert!(!init_config_file(&path).unwrap());
        assert_eq!(load_settings(&path).sync.poll_interval_ms, 5000);
    }
}
