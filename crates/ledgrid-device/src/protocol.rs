//! Wire format of the device HTTP surface
//!
//! - `GET /set_pixel?x=<row>&y=<col>&r=<0-255>&g=<0-255>&b=<0-255>`
//! - `GET /led_status` returns a JSON array of `{"r","g","b"}` objects in
//!   row-major order
//! - `GET /<mode path>` starts or cancels a device-side animation

use std::fmt;
use std::str::FromStr;

use ledgrid_core::{Color, Coordinate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::DeviceError;

pub const SET_PIXEL_PATH: &str = "set_pixel";
pub const LED_STATUS_PATH: &str = "led_status";

/// Query string of a set-pixel command.
///
/// The device calls the row `x` and the column `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelQuery {
    pub x: usize,
    pub y: usize,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PixelQuery {
    pub fn new(coord: Coordinate, color: Color) -> Self {
        Self {
            x: coord.row,
            y: coord.col,
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }

    pub fn color(&self) -> Color {
        Color::new(self.r, self.g, self.b)
    }
}

/// One LED as reported by `/led_status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireLed {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<WireLed> for Color {
    fn from(led: WireLed) -> Self {
        Color::new(led.r, led.g, led.b)
    }
}

impl From<Color> for WireLed {
    fn from(c: Color) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

/// Decode a `/led_status` body into exactly `expected_len` colors.
///
/// A channel outside 0..=255, a missing field, or a wrong element count
/// rejects the whole payload.
pub fn decode_status(body: &str, expected_len: usize) -> Result<Vec<Color>, DeviceError> {
    let leds: Vec<WireLed> = serde_json::from_str(body)
        .map_err(|e| DeviceError::malformed(format!("invalid LED status JSON: {e}")))?;

    if leds.len() != expected_len {
        return Err(DeviceError::malformed(format!(
            "expected {expected_len} LEDs, got {}",
            leds.len()
        )));
    }

    Ok(leds.into_iter().map(Color::from).collect())
}

/// Encode colors the way the device reports them.
pub fn encode_status(colors: &[Color]) -> Vec<WireLed> {
    colors.iter().copied().map(WireLed::from).collect()
}

/// Device-side display modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceMode {
    /// First pre-programmed show
    ShowOne,
    /// Second pre-programmed show
    ShowTwo,
    /// Reactive animation
    Dynamic,
    /// Stop the running show
    Off,
}

impl DeviceMode {
    pub const ALL: [DeviceMode; 4] = [
        DeviceMode::ShowOne,
        DeviceMode::ShowTwo,
        DeviceMode::Dynamic,
        DeviceMode::Off,
    ];

    /// Path segment on the device, relative to its base URL
    pub fn path(self) -> &'static str {
        match self {
            DeviceMode::ShowOne => "modo_show_1",
            DeviceMode::ShowTwo => "modo_show_2",
            DeviceMode::Dynamic => "modo_dinamico",
            DeviceMode::Off => "desactivar-modo-show-1",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DeviceMode::ShowOne => "show 1",
            DeviceMode::ShowTwo => "show 2",
            DeviceMode::Dynamic => "dynamic",
            DeviceMode::Off => "off",
        }
    }

    /// Whether this mode leaves an animation running on the device
    pub fn is_active(self) -> bool {
        !matches!(self, DeviceMode::Off)
    }
}

impl fmt::Display for DeviceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode {0:?} (expected show1, show2, dynamic or off)")]
pub struct ParseModeError(String);

impl FromStr for DeviceMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "show1" | "show-1" | "show_1" => Ok(DeviceMode::ShowOne),
            "show2" | "show-2" | "show_2" => Ok(DeviceMode::ShowTwo),
            "dynamic" => Ok(DeviceMode::Dynamic),
            "off" | "stop" => Ok(DeviceMode::Off),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}
