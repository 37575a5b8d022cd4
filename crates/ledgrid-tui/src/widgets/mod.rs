//! Custom widgets for the TUI

mod color_picker;
mod grid_view;
mod header;
mod status_bar;

pub use color_picker::ColorPicker;
pub use grid_view::GridView;
pub use header::MainHeader;
pub use status_bar::StatusBar;
