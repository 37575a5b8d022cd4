//! Screen layout definitions for the TUI
//!
//! The grid panel is sized from the grid dimension so that every LED gets a
//! fixed block of terminal cells; the color picker takes the remaining width.

use ledgrid_core::Coordinate;
use ratatui::layout::{Constraint, Layout, Rect};

/// Terminal columns per LED
pub const CELL_WIDTH: u16 = 4;

/// Terminal rows per LED
pub const CELL_HEIGHT: u16 = 2;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title, device address and sync indicator
    pub header: Rect,

    /// Bordered LED grid panel
    pub grid: Rect,

    /// Palette and hex input panel
    pub picker: Rect,

    /// One-line status / key hints
    pub status: Rect,
}

/// Outer size of the grid panel, borders included
pub fn grid_panel_size(grid_size: usize) -> (u16, u16) {
    let n = u16::try_from(grid_size).unwrap_or(u16::MAX);
    (
        n.saturating_mul(CELL_WIDTH).saturating_add(2),
        n.saturating_mul(CELL_HEIGHT).saturating_add(2),
    )
}

/// Create the main screen layout
pub fn create(area: Rect, grid_size: usize) -> ScreenAreas {
    let [header, body, status] = Layout::vertical([
        Constraint::Length(3), // Header (glass container)
        Constraint::Min(3),    // Grid + picker
        Constraint::Length(1), // Status line
    ])
    .areas(area);

    let (grid_width, grid_height) = grid_panel_size(grid_size);
    let [grid_column, picker] =
        Layout::horizontal([Constraint::Length(grid_width), Constraint::Min(10)]).areas(body);
    let [grid, _] =
        Layout::vertical([Constraint::Length(grid_height), Constraint::Min(0)]).areas(grid_column);

    ScreenAreas {
        header,
        grid,
        picker,
        status,
    }
}

/// Area inside the grid panel's border
pub fn grid_inner(grid: Rect) -> Rect {
    Rect {
        x: grid.x.saturating_add(1),
        y: grid.y.saturating_add(1),
        width: grid.width.saturating_sub(2),
        height: grid.height.saturating_sub(2),
    }
}

/// Terminal rectangle of one LED, clipped to the grid panel
pub fn cell_rect(grid: Rect, coord: Coordinate) -> Rect {
    let inner = grid_inner(grid);
    let col = u16::try_from(coord.col).unwrap_or(u16::MAX);
    let row = u16::try_from(coord.row).unwrap_or(u16::MAX);
    let cell = Rect {
        x: inner.x.saturating_add(col.saturating_mul(CELL_WIDTH)),
        y: inner.y.saturating_add(row.saturating_mul(CELL_HEIGHT)),
        width: CELL_WIDTH,
        height: CELL_HEIGHT,
    };
    cell.intersection(inner)
}

/// Map a terminal position to the LED under it
pub fn cell_at(grid: Rect, grid_size: usize, column: u16, row: u16) -> Option<Coordinate> {
    let inner = grid_inner(grid);
    if column < inner.x || row < inner.y {
        return None;
    }
    let col = usize::from((column - inner.x) / CELL_WIDTH);
    let r = usize::from((row - inner.y) / CELL_HEIGHT);
    let coord = Coordinate::new(r, col);

    (coord.is_within(grid_size) && cell_rect(grid, coord).contains((column, row).into()))
        .then_some(coord)
}
