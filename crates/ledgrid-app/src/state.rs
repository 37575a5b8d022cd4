//! Application state (Model in TEA pattern)

use chrono::{DateTime, Local};
use ledgrid_core::{Color, Coordinate};
use ledgrid_device::DeviceMode;

use crate::config::Settings;
use crate::message::Direction;
use crate::status::StatusNotifier;
use crate::sync::SyncController;

/// Longest accepted hex entry (`#rrggbb`)
pub const HEX_INPUT_MAX_LEN: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    /// Teardown started; late device results are discarded
    Quitting,
}

/// Current UI mode/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Grid navigation
    #[default]
    Normal,
    /// Typing a hex color
    HexInput,
}

/// Complete application state (the Model in TEA)
#[derive(Debug)]
pub struct AppState {
    pub phase: AppPhase,
    pub ui_mode: UiMode,

    /// Grid mirror and pending writes
    pub sync: SyncController,

    /// Transient status line
    pub status: StatusNotifier,

    pub cursor: Coordinate,

    /// Color used for the next paint
    pub selected_color: Color,
    pub palette: Vec<Color>,
    /// Palette slot of `selected_color`, if it came from the palette
    pub palette_index: Option<usize>,
    pub hex_input: String,

    /// Last mode the device confirmed; best effort only
    pub active_mode: Option<DeviceMode>,
    /// Mode change currently in flight
    pub mode_request: Option<DeviceMode>,

    /// Wall-clock time of the last merged poll
    pub last_sync: Option<DateTime<Local>>,

    pub settings: Settings,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let sync = SyncController::new(
            settings.device.grid_size,
            settings.sync.failure_threshold,
        );
        let status = StatusNotifier::new(settings.ui.status_duration());
        let palette = settings.ui.palette.clone();
        let selected_color = settings.ui.default_color;
        let palette_index = palette.iter().position(|&c| c == selected_color);

        Self {
            phase: AppPhase::Running,
            ui_mode: UiMode::Normal,
            sync,
            status,
            cursor: Coordinate::new(0, 0),
            selected_color,
            palette,
            palette_index,
            hex_input: String::new(),
            active_mode: None,
            mode_request: None,
            last_sync: None,
            settings,
        }
    }

    pub fn grid_size(&self) -> usize {
        self.sync.grid().size()
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    /// Move the cursor, clamped to the grid edges.
    pub fn move_cursor(&mut self, direction: Direction) {
        let last = self.grid_size().saturating_sub(1);
        let Coordinate { row, col } = self.cursor;
        self.cursor = match direction {
            Direction::Up => Coordinate::new(row.saturating_sub(1), col),
            Direction::Down => Coordinate::new((row + 1).min(last), col),
            Direction::Left => Coordinate::new(row, col.saturating_sub(1)),
            Direction::Right => Coordinate::new(row, (col + 1).min(last)),
            Direction::RowStart => Coordinate::new(row, 0),
            Direction::RowEnd => Coordinate::new(row, last),
        };
    }

    /// Select palette slot `index`; out-of-range slots are ignored.
    pub fn select_palette_slot(&mut self, index: usize) -> bool {
        match self.palette.get(index) {
            Some(&color) => {
                self.selected_color = color;
                self.palette_index = Some(index);
                true
            }
            None => false,
        }
    }

    /// Step through the palette, wrapping at both ends.
    pub fn cycle_palette(&mut self, forward: bool) {
        let len = self.palette.len();
        if len == 0 {
            return;
        }
        let next = match (self.palette_index, forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
            (None, true) => 0,
            (None, false) => len - 1,
        };
        self.select_palette_slot(next);
    }

    pub fn select_color(&mut self, color: Color) {
        self.selected_color = color;
        self.palette_index = self.palette.iter().position(|&c| c == color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = AppState::new();
        assert_eq!(state.phase, AppPhase::Running);
        assert_eq!(state.ui_mode, UiMode::Normal);
        assert_eq!(state.grid_size(), 8);
        assert_eq!(state.selected_color, Color::WHITE);
        assert_eq!(state.palette_index, Some(0));
        assert!(!state.should_quit());
    }

    #[test]
    fn test_cursor_clamps_to_edges() {
        let mut state = AppState::new();
        state.move_cursor(Direction::Up);
        state.move_cursor(Direction::Left);
        assert_eq!(state.cursor, Coordinate::new(0, 0));

        for _ in 0..20 {
            state.move_cursor(Direction::Down);
            state.move_cursor(Direction::Right);
        }
        assert_eq!(state.cursor, Coordinate::new(7, 7));

        state.move_cursor(Direction::RowStart);
        assert_eq!(state.cursor, Coordinate::new(7, 0));
        state.move_cursor(Direction::RowEnd);
        assert_eq!(state.cursor, Coordinate::new(7, 7));
    }

    #[test]
    fn test_palette_cycles_and_wraps() {
        let mut state = AppState::new();
        let len = state.palette.len();

        state.cycle_palette(false);
        assert_eq!(state.palette_index, Some(len - 1));
        state.cycle_palette(true);
        assert_eq!(state.palette_index, Some(0));
        assert_eq!(state.selected_color, state.palette[0]);
    }

    #[test]
    fn test_select_custom_color_clears_slot() {
        let mut state = AppState::new();
        state.select_color(Color::new(1, 2, 3));
        assert_eq!(state.palette_index, None);

        state.cycle_palette(true);
        assert_eq!(state.palette_index, Some(0));
    }

    #[test]
    fn test_select_slot_out_of_range() {
        let mut state = AppState::new();
        assert!(!state.select_palette_slot(42));
        assert_eq!(state.palette_index, Some(0));
    }
}
