//! Configuration file parsing
//!
//! Settings live in `<config dir>/ledgrid/config.toml` unless a path is given
//! on the command line.

pub mod settings;
pub mod types;

pub use settings::{default_config_path, init_config_file, load_settings, sanitize};
pub use types::*;
