//! Grid synchronization state machine
//!
//! Reconciles optimistic local writes with periodic full-state polls.
//!
//! - A tapped cell is painted locally at once and enters the pending set until
//!   the device answers. Polls never overwrite pending cells.
//! - A tap on a cell whose write is still in flight is queued instead of sent.
//!   Only the newest queued color survives, and it is sent when the in-flight
//!   write resolves.
//! - At most one poll is outstanding. Cells whose write resolved while that
//!   poll was in flight are also protected from it, since its payload predates
//!   the write.
//! - A failed write keeps its optimistic color. A failed poll changes nothing.
//!
//! The controller performs no I/O. The handler turns its return values into
//! gateway actions and feeds the results back in.

use std::collections::{HashMap, HashSet};

use ledgrid_core::prelude::*;
use ledgrid_core::{Color, Coordinate, GridState};
use ledgrid_device::DeviceError;

/// Consecutive poll failures tolerated before the user is told
pub const DEFAULT_FAILURE_THRESHOLD: u32 = 3;

/// State of one pending cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingWrite {
    /// Color of the request currently on the wire
    pub in_flight: Color,
    /// Newest color tapped while the request was in flight
    pub queued: Option<Color>,
}

/// A set-pixel request the caller must send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteRequest {
    pub coord: Coordinate,
    pub color: Color,
}

/// What a finished poll did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Payload merged; `changed` cells took a new color
    Merged { changed: usize },
    /// Payload discarded. `report` is true exactly once per failure streak,
    /// when `consecutive` reaches the threshold.
    Failed {
        consecutive: u32,
        report: bool,
        reason: String,
    },
    /// No poll was outstanding; the result was ignored
    Unexpected,
}

/// Owner of the local grid mirror and the pending-write set
#[derive(Debug, Clone)]
pub struct SyncController {
    grid: GridState,
    pending: HashMap<Coordinate, PendingWrite>,
    settled_during_poll: HashSet<Coordinate>,
    poll_in_flight: bool,
    consecutive_failures: u32,
    failure_threshold: u32,
}

impl SyncController {
    pub fn new(grid_size: usize, failure_threshold: u32) -> Self {
        Self {
            grid: GridState::new(grid_size),
            pending: HashMap::new(),
            settled_during_poll: HashSet::new(),
            poll_in_flight: false,
            consecutive_failures: 0,
            failure_threshold: failure_threshold.max(1),
        }
    }

    /// Read-only view of the mirror
    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn is_pending(&self, coord: Coordinate) -> bool {
        self.pending.contains_key(&coord)
    }

    pub fn pending(&self, coord: Coordinate) -> Option<&PendingWrite> {
        self.pending.get(&coord)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_polling(&self) -> bool {
        self.poll_in_flight
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn failure_threshold(&self) -> u32 {
        self.failure_threshold
    }

    /// False once the failure streak has reached the threshold
    pub fn is_healthy(&self) -> bool {
        self.consecutive_failures < self.failure_threshold
    }

    // ─────────────────────────────────────────────────────────
    // Writes
    // ─────────────────────────────────────────────────────────

    /// Paint `coord` locally and decide whether a request must be sent.
    ///
    /// Returns `Some` for a cell with nothing in flight. For a cell that is
    /// already pending, the color replaces any earlier queued color and
    /// `None` is returned.
    pub fn begin_write(&mut self, coord: Coordinate, color: Color) -> Result<Option<WriteRequest>> {
        self.grid.set(coord, color)?;

        if let Some(entry) = self.pending.get_mut(&coord) {
            if let Some(superseded) = entry.queued.replace(color) {
                trace!("Dropped queued {} for {}", superseded, coord);
            }
            debug!("Coalesced write {} -> {} behind {}", coord, color, entry.in_flight);
            return Ok(None);
        }

        self.pending.insert(
            coord,
            PendingWrite {
                in_flight: color,
                queued: None,
            },
        );
        Ok(Some(WriteRequest { coord, color }))
    }

    /// Record that the in-flight write for `coord` resolved, either way.
    ///
    /// Returns the queued follow-up request, if any; the cell then stays
    /// pending. The grid is never rolled back.
    pub fn complete_write(&mut self, coord: Coordinate) -> Option<WriteRequest> {
        if self.poll_in_flight {
            self.settled_during_poll.insert(coord);
        }

        let Some(entry) = self.pending.get_mut(&coord) else {
            warn!("Write completion for {} with no pending entry", coord);
            return None;
        };

        match entry.queued.take() {
            Some(next) => {
                entry.in_flight = next;
                Some(WriteRequest { coord, color: next })
            }
            None => {
                self.pending.remove(&coord);
                None
            }
        }
    }

    // ─────────────────────────────────────────────────────────
    // Polls
    // ─────────────────────────────────────────────────────────

    /// Claim the single poll slot. False means a poll is already outstanding
    /// and this tick must be skipped.
    pub fn begin_poll(&mut self) -> bool {
        if self.poll_in_flight {
            return false;
        }
        self.poll_in_flight = true;
        self.settled_during_poll.clear();
        true
    }

    /// Apply the result of the outstanding poll.
    pub fn complete_poll(&mut self, result: std::result::Result<Vec<Color>, DeviceError>) -> PollOutcome {
        if !self.poll_in_flight {
            return PollOutcome::Unexpected;
        }
        self.poll_in_flight = false;
        let settled = std::mem::take(&mut self.settled_during_poll);

        let colors = match result {
            Ok(colors) => colors,
            Err(e) => return self.record_failure(e.to_string()),
        };

        let pending = &self.pending;
        let merged = self
            .grid
            .merge_from(&colors, |c| pending.contains_key(&c) || settled.contains(&c));

        match merged {
            Ok(changed) => {
                if self.consecutive_failures > 0 {
                    info!(
                        "Device reachable again after {} failed polls",
                        self.consecutive_failures
                    );
                }
                self.consecutive_failures = 0;
                PollOutcome::Merged { changed }
            }
            Err(e) => self.record_failure(e.to_string()),
        }
    }

    fn record_failure(&mut self, reason: String) -> PollOutcome {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        PollOutcome::Failed {
            consecutive: self.consecutive_failures,
            report: self.consecutive_failures == self.failure_threshold,
            reason,
        }
    }
}

impl Default for SyncController {
    fn default() -> Self {
        Self::new(ledgrid_core::DEFAULT_GRID_SIZE, DEFAULT_FAILURE_THRESHOLD)
    }
}
