//! Message types for the application (TEA pattern)

use crate::input_key::InputKey;
use ledgrid_core::{Color, Coordinate};
use ledgrid_device::{DeviceError, DeviceMode};

/// Cursor movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    RowStart,
    RowEnd,
}

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates (status expiry)
    Tick,

    /// Quit (q, Esc, Ctrl+C, signal handler)
    Quit,

    // ─────────────────────────────────────────────────────────
    // Grid Messages
    // ─────────────────────────────────────────────────────────
    /// Move the grid cursor
    MoveCursor(Direction),
    /// Paint the cell under the cursor with the selected color
    PaintCursor,
    /// A cell was clicked: move the cursor there and paint it
    CellClicked(Coordinate),

    // ─────────────────────────────────────────────────────────
    // Color Picker Messages
    // ─────────────────────────────────────────────────────────
    NextColor,
    PrevColor,
    /// Select a palette entry by zero-based slot
    SelectPaletteSlot(usize),
    /// Open the hex entry field
    StartHexInput,
    HexInputChar(char),
    HexInputBackspace,
    /// Parse the hex field and select the color
    SubmitHexInput,
    CancelHexInput,

    // ─────────────────────────────────────────────────────────
    // Device Mode Messages
    // ─────────────────────────────────────────────────────────
    /// Ask the device to switch display mode
    RequestMode(DeviceMode),
    /// Start show 1, or stop it if it is the active mode
    ToggleShowOne,

    // ─────────────────────────────────────────────────────────
    // Sync Messages
    // ─────────────────────────────────────────────────────────
    /// Periodic poll timer fired
    PollTick,
    /// User asked for an immediate poll
    RefreshNow,

    // ─────────────────────────────────────────────────────────
    // Device Results
    // ─────────────────────────────────────────────────────────
    /// A set-pixel request resolved
    PixelWriteFinished {
        coord: Coordinate,
        color: Color,
        result: Result<(), DeviceError>,
    },
    /// A status poll resolved
    PollFinished {
        result: Result<Vec<Color>, DeviceError>,
    },
    /// A mode change resolved
    ModeFinished {
        mode: DeviceMode,
        result: Result<(), DeviceError>,
    },
}
