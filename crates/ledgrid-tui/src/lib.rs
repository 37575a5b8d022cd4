//! ledgrid-tui - Terminal UI for the LED grid controller
//!
//! This crate provides the ratatui-based terminal interface. It creates an
//! Engine from ledgrid-app and adds terminal rendering, keyboard and mouse
//! polling, and the grid and color picker widgets.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry points
pub use runner::{run, run_with_gateway};
