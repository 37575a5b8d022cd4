//! Test utilities for gateway consumers
//!
//! Provides a scripted in-memory [`DeviceGateway`] that records every call.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use ledgrid_core::{Color, Coordinate, DEFAULT_GRID_SIZE};

use crate::error::DeviceError;
use crate::gateway::DeviceGateway;
use crate::protocol::DeviceMode;

/// A call observed by [`MockGateway`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    SetPixel(Coordinate, Color),
    FetchStatus,
    SetMode(DeviceMode),
}

/// Scripted gateway.
///
/// Queued results are returned in order; once a queue is empty, writes and
/// mode changes succeed and status polls report an all-off grid.
#[derive(Debug)]
pub struct MockGateway {
    grid_size: usize,
    delay: Option<Duration>,
    calls: Mutex<Vec<GatewayCall>>,
    pixel_results: Mutex<VecDeque<Result<(), DeviceError>>>,
    status_results: Mutex<VecDeque<Result<Vec<Color>, DeviceError>>>,
    mode_results: Mutex<VecDeque<Result<(), DeviceError>>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::with_grid_size(DEFAULT_GRID_SIZE)
    }

    pub fn with_grid_size(grid_size: usize) -> Self {
        Self {
            grid_size,
            delay: None,
            calls: Mutex::new(Vec::new()),
            pixel_results: Mutex::new(VecDeque::new()),
            status_results: Mutex::new(VecDeque::new()),
            mode_results: Mutex::new(VecDeque::new()),
        }
    }

    /// Delay every call, to keep requests in flight
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn push_pixel_result(&self, result: Result<(), DeviceError>) {
        lock(&self.pixel_results).push_back(result);
    }

    pub fn push_status(&self, result: Result<Vec<Color>, DeviceError>) {
        lock(&self.status_results).push_back(result);
    }

    pub fn push_mode_result(&self, result: Result<(), DeviceError>) {
        lock(&self.mode_results).push_back(result);
    }

    /// Every call so far, in order
    pub fn calls(&self) -> Vec<GatewayCall> {
        lock(&self.calls).clone()
    }

    /// Only the set-pixel calls, in order
    pub fn pixel_writes(&self) -> Vec<(Coordinate, Color)> {
        lock(&self.calls)
            .iter()
            .filter_map(|call| match call {
                GatewayCall::SetPixel(coord, color) => Some((*coord, *color)),
                _ => None,
            })
            .collect()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn record(&self, call: GatewayCall) {
        lock(&self.calls).push(call);
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceGateway for MockGateway {
    async fn set_pixel(&self, coord: Coordinate, color: Color) -> Result<(), DeviceError> {
        self.record(GatewayCall::SetPixel(coord, color));
        self.pause().await;
        lock(&self.pixel_results).pop_front().unwrap_or(Ok(()))
    }

    async fn fetch_status(&self) -> Result<Vec<Color>, DeviceError> {
        self.record(GatewayCall::FetchStatus);
        self.pause().await;
        let scripted = lock(&self.status_results).pop_front();
        scripted.unwrap_or_else(|| Ok(vec![Color::OFF; self.grid_size * self.grid_size]))
    }

    async fn set_mode(&self, mode: DeviceMode) -> Result<(), DeviceError> {
        self.record(GatewayCall::SetMode(mode));
        self.pause().await;
        lock(&self.mode_results).pop_front().unwrap_or(Ok(()))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// `size * size` copies of `color`
pub fn uniform_status(size: usize, color: Color) -> Vec<Color> {
    vec![color; size * size]
}
