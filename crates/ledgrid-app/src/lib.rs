//! ledgrid-app - Application state and device synchronization
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state
//! management, the grid synchronization state machine, the transient status
//! line, configuration loading, and the Engine that wires them to a
//! [`ledgrid_device::DeviceGateway`].

pub mod actions;
pub mod config;
pub mod engine;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod process;
pub mod signals;
pub mod state;
pub mod status;
pub mod sync;

// Re-export primary types
pub use engine::Engine;
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::{Direction, Message};
pub use state::{AppPhase, AppState, UiMode};
pub use status::{StatusLevel, StatusMessage, StatusNotifier};
pub use sync::{PendingWrite, PollOutcome, SyncController, WriteRequest};

// Re-export device types for the TUI
pub use ledgrid_device::DeviceMode;
