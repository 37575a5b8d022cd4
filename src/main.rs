//! ledgrid - terminal controller for an 8x8 LED matrix device
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, eyre, WrapErr};
use ledgrid_app::config::{self, Settings};
use ledgrid_app::DeviceMode;
use ledgrid_core::{logging, Color, Coordinate};
use ledgrid_device::{DeviceGateway, HttpGateway};
use tracing::info;

/// Paint and monitor an LED grid from the terminal
#[derive(Parser, Debug)]
#[command(name = "ledgrid")]
#[command(about = "Terminal controller for an LED matrix device", long_about = None)]
#[command(version)]
struct Args {
    /// Config file (default: <config dir>/ledgrid/config.toml)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Device base URL, overriding the config file
    #[arg(long, value_name = "URL", global = true)]
    device_url: Option<String>,

    /// Status poll interval in milliseconds, overriding the config file
    #[arg(long, value_name = "MS")]
    poll_interval_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Set one LED and exit
    Set {
        /// Row, from the top
        row: usize,
        /// Column, from the left
        col: usize,
        /// Color as hex, with or without '#'
        color: Color,
    },

    /// Print the device's LED state as JSON
    Status,

    /// Start a device show: show1, show2, dynamic, or off
    Mode { mode: DeviceMode },

    /// Write a default config file if none exists
    InitConfig,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let config_path = args
        .config
        .clone()
        .or_else(config::default_config_path)
        .ok_or_else(|| eyre!("No config directory on this platform; pass --config"))?;

    logging::init()?;

    let mut settings = config::load_settings(&config_path);
    if let Some(url) = &args.device_url {
        settings.device.base_url = url.clone();
    }
    if let Some(ms) = args.poll_interval_ms {
        settings.sync.poll_interval_ms = ms;
    }

    match args.command {
        None => {
            ledgrid_tui::run(settings).await?;
        }
        Some(command) => {
            let output = run_command(command, &settings, &config_path).await?;
            println!("{}", output);
        }
    }

    Ok(())
}

fn gateway(settings: &Settings) -> ledgrid_core::Result<HttpGateway> {
    HttpGateway::new(
        &settings.device.base_url,
        settings.device.request_timeout(),
        settings.device.grid_size,
    )
}

/// One-shot commands: one request, returns the text to print
async fn run_command(
    command: Command,
    settings: &Settings,
    config_path: &Path,
) -> color_eyre::Result<String> {
    let size = settings.device.grid_size;

    let output = match command {
        Command::InitConfig => {
            if config::init_config_file(config_path)? {
                format!("Wrote {}", config_path.display())
            } else {
                format!("{} already exists", config_path.display())
            }
        }

        Command::Set { row, col, color } => {
            let coord = Coordinate::new(row, col);
            if !coord.is_within(size) {
                bail!("{} is outside the {}x{} grid", coord, size, size);
            }
            gateway(settings)?
                .set_pixel(coord, color)
                .await
                .wrap_err_with(|| format!("Failed to update LED {}", coord))?;
            info!("CLI set {} to {}", coord, color);
            format!("LED {} set to {}", coord, color)
        }

        Command::Status => {
            let colors = gateway(settings)?
                .fetch_status()
                .await
                .wrap_err("Failed to read LED status")?;
            let rows: Vec<Vec<String>> = colors
                .chunks(size)
                .map(|row| row.iter().map(|c| c.to_hex()).collect())
                .collect();
            serde_json::to_string_pretty(&rows)?
        }

        Command::Mode { mode } => {
            gateway(settings)?
                .set_mode(mode)
                .await
                .wrap_err_with(|| format!("Could not switch to {}", mode))?;
            if mode.is_active() {
                format!("Mode {} activated", mode)
            } else {
                "Show stopped".to_string()
            }
        }
    };

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::extract::RawQuery;
    use axum::{routing::get, Json, Router};
    use ledgrid_device::WireLed;

    type Seen = Arc<Mutex<Vec<String>>>;

    /// Fake device on a random port: records set_pixel queries and mode
    /// paths, and reports LED i as `{r: i, g: 0, b: 0}`.
    async fn spawn_device(seen: Seen) -> String {
        let pixel_seen = seen.clone();
        let mode_seen = seen;
        let app = Router::new()
            .route(
                "/set_pixel",
                get(move |RawQuery(query): RawQuery| {
                    let seen = pixel_seen.clone();
                    async move {
                        seen.lock().unwrap().push(query.unwrap_or_default());
                        "LED updated"
                    }
                }),
            )
            .route(
                "/led_status",
                get(|| async {
                    Json(
                        (0..64u8)
                            .map(|i| WireLed { r: i, g: 0, b: 0 })
                            .collect::<Vec<_>>(),
                    )
                }),
            )
            .route(
                "/modo_show_2",
                get(move || {
                    let seen = mode_seen.clone();
                    async move {
                        seen.lock().unwrap().push("modo_show_2".to_string());
                        "ok"
                    }
                }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn settings_for(url: &str) -> Settings {
        let mut settings = Settings::default();
        settings.device.base_url = url.to_string();
        settings
    }

    fn config_path() -> PathBuf {
        PathBuf::from("unused-config.toml")
    }

    #[tokio::test]
    async fn test_set_sends_row_as_x() {
        let seen = Seen::default();
        let url = spawn_device(seen.clone()).await;

        let output = run_command(
            Command::Set {
                row: 2,
                col: 5,
                color: Color::new(255, 0, 0),
            },
            &settings_for(&url),
            &config_path(),
        )
        .await
        .unwrap();

        assert_eq!(output, "LED (2, 5) set to #ff0000");
        assert_eq!(*seen.lock().unwrap(), vec!["x=2&y=5&r=255&g=0&b=0"]);
    }

    #[tokio::test]
    async fn test_set_outside_grid_fails_before_any_request() {
        let seen = Seen::default();
        let url = spawn_device(seen.clone()).await;

        let err = run_command(
            Command::Set {
                row: 8,
                col: 0,
                color: Color::WHITE,
            },
            &settings_for(&url),
            &config_path(),
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("outside the 8x8 grid"));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_status_prints_one_array_per_row() {
        let url = spawn_device(Seen::default()).await;

        let output = run_command(Command::Status, &settings_for(&url), &config_path())
            .await
            .unwrap();

        let rows: Vec<Vec<String>> = serde_json::from_str(&output).unwrap();
        assert_eq!(rows.len(), 8);
        assert!(rows.iter().all(|row| row.len() == 8));
        assert_eq!(rows[0][0], "#000000");
        assert_eq!(rows[1][0], "#080000");
        assert_eq!(rows[7][7], "#3f0000");
    }

    #[tokio::test]
    async fn test_mode_hits_mode_path() {
        let seen = Seen::default();
        let url = spawn_device(seen.clone()).await;

        let output = run_command(
            Command::Mode {
                mode: DeviceMode::ShowTwo,
            },
            &settings_for(&url),
            &config_path(),
        )
        .await
        .unwrap();

        assert_eq!(output, format!("Mode {} activated", DeviceMode::ShowTwo));
        assert_eq!(*seen.lock().unwrap(), vec!["modo_show_2"]);
    }

    #[tokio::test]
    async fn test_unknown_mode_path_is_an_error() {
        let url = spawn_device(Seen::default()).await;

        let result = run_command(
            Command::Mode {
                mode: DeviceMode::Dynamic,
            },
            &settings_for(&url),
            &config_path(),
        )
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_init_config_writes_once() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("ledgrid").join("config.toml");
        let settings = Settings::default();

        let first = run_command(Command::InitConfig, &settings, &path)
            .await
            .unwrap();
        assert!(first.starts_with("Wrote"));

        let second = run_command(Command::InitConfig, &settings, &path)
            .await
            .unwrap();
        assert!(second.ends_with("already exists"));
    }
}
