//! Main update function - handles state transitions (TEA pattern)

use std::time::Instant;

use ledgrid_core::prelude::*;
use ledgrid_core::{Color, Coordinate};
use ledgrid_device::DeviceMode;

use crate::message::Message;
use crate::state::{AppPhase, AppState, UiMode, HEX_INPUT_MAX_LEN};

use super::{device, keys::handle_key, UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.phase = AppPhase::Quitting;
            UpdateResult::none()
        }

        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::Tick => {
            state.status.expire(Instant::now());
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Grid Messages
        // ─────────────────────────────────────────────────────────
        Message::MoveCursor(direction) => {
            state.move_cursor(direction);
            UpdateResult::none()
        }

        Message::PaintCursor => {
            let coord = state.cursor;
            paint(state, coord)
        }

        Message::CellClicked(coord) => {
            if !state.sync.grid().contains(coord) {
                return UpdateResult::none();
            }
            state.cursor = coord;
            paint(state, coord)
        }

        // ─────────────────────────────────────────────────────────
        // Color Picker Messages
        // ─────────────────────────────────────────────────────────
        Message::NextColor => {
            state.cycle_palette(true);
            UpdateResult::none()
        }

        Message::PrevColor => {
            state.cycle_palette(false);
            UpdateResult::none()
        }

        Message::SelectPaletteSlot(index) => {
            state.select_palette_slot(index);
            UpdateResult::none()
        }

        Message::StartHexInput => {
            state.ui_mode = UiMode::HexInput;
            state.hex_input = "#".to_string();
            UpdateResult::none()
        }

        Message::HexInputChar(c) => {
            if state.hex_input.len() < HEX_INPUT_MAX_LEN {
                state.hex_input.push(c);
            }
            UpdateResult::none()
        }

        Message::HexInputBackspace => {
            state.hex_input.pop();
            UpdateResult::none()
        }

        Message::SubmitHexInput => submit_hex_input(state),

        Message::CancelHexInput => {
            state.ui_mode = UiMode::Normal;
            state.hex_input.clear();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Device Mode Messages
        // ─────────────────────────────────────────────────────────
        Message::ToggleShowOne => {
            let mode = if state.active_mode == Some(DeviceMode::ShowOne) {
                DeviceMode::Off
            } else {
                DeviceMode::ShowOne
            };
            UpdateResult::message(Message::RequestMode(mode))
        }

        Message::RequestMode(mode) => {
            if let Some(in_flight) = state.mode_request {
                state
                    .status
                    .info(format!("Still switching to {}...", in_flight));
                return UpdateResult::none();
            }
            state.mode_request = Some(mode);
            UpdateResult::action(UpdateAction::SetMode(mode))
        }

        // ─────────────────────────────────────────────────────────
        // Sync Messages
        // ─────────────────────────────────────────────────────────
        Message::PollTick => {
            if state.sync.begin_poll() {
                UpdateResult::action(UpdateAction::FetchStatus)
            } else {
                trace!("Poll still outstanding, skipping tick");
                UpdateResult::none()
            }
        }

        Message::RefreshNow => {
            if state.sync.begin_poll() {
                UpdateResult::action(UpdateAction::FetchStatus)
            } else {
                state.status.info("Sync already in progress");
                UpdateResult::none()
            }
        }

        // ─────────────────────────────────────────────────────────
        // Device Results
        // ─────────────────────────────────────────────────────────
        Message::PixelWriteFinished { .. }
        | Message::PollFinished { .. }
        | Message::ModeFinished { .. }
            if state.phase == AppPhase::Quitting =>
        {
            debug!("Discarding device result after quit");
            UpdateResult::none()
        }

        Message::PixelWriteFinished {
            coord,
            color,
            result,
        } => device::handle_write_finished(state, coord, color, result),

        Message::PollFinished { result } => device::handle_poll_finished(state, result),

        Message::ModeFinished { mode, result } => {
            device::handle_mode_finished(state, mode, result)
        }
    }
}

/// Paint `coord` with the selected color.
fn paint(state: &mut AppState, coord: Coordinate) -> UpdateResult {
    let color = state.selected_color;
    match state.sync.begin_write(coord, color) {
        Ok(Some(request)) => UpdateResult::action(UpdateAction::WritePixel {
            coord: request.coord,
            color: request.color,
        }),
        Ok(None) => UpdateResult::none(),
        Err(e) => {
            warn!("Rejected paint at {}: {}", coord, e);
            state.status.error(e.to_string());
            UpdateResult::none()
        }
    }
}

fn submit_hex_input(state: &mut AppState) -> UpdateResult {
    match Color::from_hex(&state.hex_input) {
        Ok(color) => {
            state.select_color(color);
            state.ui_mode = UiMode::Normal;
            state.hex_input.clear();
            state.status.info(format!("Selected {}", color));
        }
        Err(e) => {
            // Stay in input mode so the entry can be corrected
            state.status.error(e.to_string());
        }
    }
    UpdateResult::none()
}
