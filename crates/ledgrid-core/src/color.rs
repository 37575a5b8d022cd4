//! 24-bit RGB colors and the `#rrggbb` codec

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// An RGB color, one byte per channel.
///
/// The canonical string form is `#rrggbb` in lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Neutral gray shown for cells the device has not reported yet
    pub const OFF: Color = Color::new(0x8a, 0x88, 0x88);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `rrggbb` or `#rrggbb` (case-insensitive).
    pub fn from_hex(input: &str) -> Result<Self> {
        let digits = input.strip_prefix('#').unwrap_or(input);

        // from_str_radix tolerates a leading '+', so check the digits first
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::invalid_color(input));
        }

        let packed = u32::from_str_radix(digits, 16).map_err(|_| Error::invalid_color(input))?;
        Ok(Self::from_packed(packed))
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:06x}", self.to_packed())
    }

    /// The color as a 24-bit big-endian integer (`0xRRGGBB`)
    pub const fn to_packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Build from the low 24 bits of `value`; higher bits are ignored.
    pub const fn from_packed(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }
}

/// Parse a hex color string into its channels.
pub fn hex_to_rgb(hex: &str) -> Result<Color> {
    Color::from_hex(hex)
}

/// Format a color in canonical `#rrggbb` form.
pub fn rgb_to_hex(color: Color) -> String {
    color.to_hex()
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.to_packed())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Color::from_hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Color::from_hex(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_with_and_without_hash() {
        assert_eq!(hex_to_rgb("#ff0000").unwrap(), Color::new(255, 0, 0));
        assert_eq!(hex_to_rgb("00ff00").unwrap(), Color::new(0, 255, 0));
        assert_eq!(hex_to_rgb("#0000FF").unwrap(), Color::new(0, 0, 255));
    }

    #[test]
    fn test_default_cell_color() {
        assert_eq!(hex_to_rgb("#8a8888").unwrap(), Color::OFF);
        assert_eq!(Color::OFF.to_hex(), "#8a8888");
    }

    #[test]
    fn test_format_is_lowercase_and_padded() {
        assert_eq!(rgb_to_hex(Color::new(0, 0, 0)), "#000000");
        assert_eq!(rgb_to_hex(Color::new(0xab, 0x0c, 0x01)), "#ab0c01");
        assert_eq!(Color::new(1, 2, 3).to_string(), "#010203");
    }

    #[test]
    fn test_rejects_malformed_input() {
        for bad in ["", "#", "#fff", "#12345", "#1234567", "zzzzzz", "#+12345", "+123456", "# 12345", "##123456"] {
            let err = hex_to_rgb(bad).unwrap_err();
            assert!(
                matches!(err, Error::InvalidColorFormat { .. }),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_non_ascii() {
        assert!(hex_to_rgb("#ééé").is_err());
    }

    #[test]
    fn test_packed_form() {
        let c = Color::new(0x12, 0x34, 0x56);
        assert_eq!(c.to_packed(), 0x123456);
        assert_eq!(Color::from_packed(0xff_123456), c);
    }

    #[test]
    fn test_from_str() {
        let c: Color = "#c0ffee".parse().unwrap();
        assert_eq!(c, Color::new(0xc0, 0xff, 0xee));
    }

    #[test]
    fn test_serde_uses_hex_string() {
        let json = serde_json::to_string(&Color::new(255, 128, 0)).unwrap();
        assert_eq!(json, "\"#ff8000\"");

        let back: Color = serde_json::from_str("\"FF8000\"").unwrap();
        assert_eq!(back, Color::new(255, 128, 0));

        assert!(serde_json::from_str::<Color>("\"orange\"").is_err());
    }

    proptest! {
        #[test]
        fn hex_round_trip_preserves_color(r: u8, g: u8, b: u8) {
            let c = Color::new(r, g, b);
            prop_assert_eq!(hex_to_rgb(&rgb_to_hex(c)).unwrap(), c);
        }

        #[test]
        fn normalization_is_idempotent(s in "#?[0-9a-fA-F]{6}") {
            let once = rgb_to_hex(hex_to_rgb(&s).unwrap());
            let twice = rgb_to_hex(hex_to_rgb(&once).unwrap());
            prop_assert_eq!(&once, &twice);
            prop_assert_eq!(once, format!("#{}", s.trim_start_matches('#').to_lowercase()));
        }
    }
}
