//! Centralized theme for the TUI.
//!
//! - `palette`: raw color constants
//! - `styles`: semantic style builders and LED color mapping

pub mod palette;
pub mod styles;
