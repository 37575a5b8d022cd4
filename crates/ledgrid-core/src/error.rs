//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // Grid/Color Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid color format: {input:?} (expected 6 hex digits, optional '#')")]
    InvalidColorFormat { input: String },

    #[error("Grid dimension mismatch: expected {expected} cells, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Coordinate ({row}, {col}) is outside a {size}x{size} grid")]
    CoordinateOutOfBounds { row: usize, col: usize, size: usize },

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn invalid_color(input: impl Into<String>) -> Self {
        Self::InvalidColorFormat {
            input: input.into(),
        }
    }

    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    pub fn out_of_bounds(row: usize, col: usize, size: usize) -> Self {
        Self::CoordinateOutOfBounds { row, col, size }
    }

    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::invalid_color("#12345");
        assert!(err.to_string().contains("\"#12345\""));

        let err = Error::dimension_mismatch(64, 63);
        assert_eq!(
            err.to_string(),
            "Grid dimension mismatch: expected 64 cells, got 63"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_config_message() {
        let err = Error::config("bad device URL");
        assert_eq!(err.to_string(), "Configuration error: bad device URL");
    }

    #[test]
    fn test_out_of_bounds_message() {
        let err = Error::out_of_bounds(8, 2, 8);
        assert_eq!(
            err.to_string(),
            "Coordinate (8, 2) is outside a 8x8 grid"
        );
    }
}
