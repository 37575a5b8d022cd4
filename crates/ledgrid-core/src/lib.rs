//! # ledgrid-core - Core Domain Types
//!
//! Foundation crate for the LED grid controller. Provides the color codec,
//! the grid model, error handling, and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Colors (`color`)
//! - [`Color`] - 24-bit RGB color with a canonical `#rrggbb` form
//! - [`hex_to_rgb()`], [`rgb_to_hex()`] - The codec between both forms
//!
//! ### Grid (`grid`)
//! - [`Coordinate`] - `(row, col)` cell address, row-major index conversion
//! - [`GridState`] - Fully populated N×N mirror of the device LEDs
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Error enum organised by layer
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use ledgrid_core::prelude::*;
//! ```

pub mod color;
pub mod error;
pub mod grid;
pub mod logging;

/// Prelude for common imports used throughout all ledgrid crates
pub mod prelude {
    pub use super::error::{Error, Result};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use color::{hex_to_rgb, rgb_to_hex, Color};
pub use error::{Error, Result};
pub use grid::{Coordinate, GridState, DEFAULT_GRID_SIZE, MAX_GRID_SIZE};
