//! Device result handlers

use chrono::Local;
use ledgrid_core::prelude::*;
use ledgrid_core::{Color, Coordinate};
use ledgrid_device::{DeviceError, DeviceMode};

use crate::state::AppState;
use crate::sync::PollOutcome;

use super::{UpdateAction, UpdateResult};

/// A set-pixel request resolved. Sends the queued follow-up, if any.
pub(crate) fn handle_write_finished(
    state: &mut AppState,
    coord: Coordinate,
    color: Color,
    result: std::result::Result<(), DeviceError>,
) -> UpdateResult {
    let next = state.sync.complete_write(coord);

    match result {
        Ok(()) => {
            debug!("LED {} confirmed {}", coord, color);
            // A superseded color is not what the cell shows; report the last one
            if next.is_none() {
                state.status.info(format!("LED {} set to {}", coord, color));
            }
        }
        Err(e) => {
            warn!("Write {} -> {} failed: {}", coord, color, e);
            state
                .status
                .error(format!("Failed to update LED {}: {}", coord, e.summary()));
        }
    }

    match next {
        Some(request) => UpdateResult::action(UpdateAction::WritePixel {
            coord: request.coord,
            color: request.color,
        }),
        None => UpdateResult::none(),
    }
}

pub(crate) fn handle_poll_finished(
    state: &mut AppState,
    result: std::result::Result<Vec<Color>, DeviceError>,
) -> UpdateResult {
    match state.sync.complete_poll(result) {
        PollOutcome::Merged { changed } => {
            if changed > 0 {
                trace!("Poll updated {} cells", changed);
            }
            state.last_sync = Some(Local::now());
        }
        PollOutcome::Failed {
            consecutive,
            report,
            reason,
        } => {
            debug!("Poll failed ({} in a row): {}", consecutive, reason);
            if report {
                warn!("Device stopped answering status polls: {}", reason);
                state.status.error(format!(
                    "Device not responding ({} failed polls)",
                    consecutive
                ));
            }
        }
        PollOutcome::Unexpected => {
            warn!("Poll result arrived with no poll outstanding");
        }
    }
    UpdateResult::none()
}

pub(crate) fn handle_mode_finished(
    state: &mut AppState,
    mode: DeviceMode,
    result: std::result::Result<(), DeviceError>,
) -> UpdateResult {
    state.mode_request = None;

    match result {
        Ok(()) => {
            info!("Device mode: {}", mode);
            state.active_mode = mode.is_active().then_some(mode);
            if mode.is_active() {
                state.status.info(format!("Mode {} activated", mode));
            } else {
                state.status.info("Show stopped");
            }
        }
        Err(e) => {
            warn!("Mode {} failed: {}", mode, e);
            state
                .status
                .error(format!("Could not switch to {}: {}", mode, e.summary()));
        }
    }
    UpdateResult::none()
}
