//! Key event handlers for UI modes

use ledgrid_device::DeviceMode;

use crate::input_key::InputKey;
use crate::message::{Direction, Message};
use crate::state::{AppState, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    match state.ui_mode {
        UiMode::Normal => handle_key_normal(key),
        UiMode::HexInput => handle_key_hex_input(key),
    }
}

/// Handle key events in normal mode
fn handle_key_normal(key: InputKey) -> Option<Message> {
    if let Some(slot) = key.palette_slot() {
        return Some(Message::SelectPaletteSlot(slot));
    }

    match key {
        // Quit
        InputKey::Char('q') | InputKey::Esc => Some(Message::Quit),
        InputKey::CharCtrl('c') => Some(Message::Quit),

        // Cursor movement
        InputKey::Up | InputKey::Char('k') => Some(Message::MoveCursor(Direction::Up)),
        InputKey::Down | InputKey::Char('j') => Some(Message::MoveCursor(Direction::Down)),
        InputKey::Left | InputKey::Char('h') => Some(Message::MoveCursor(Direction::Left)),
        InputKey::Right | InputKey::Char('l') => Some(Message::MoveCursor(Direction::Right)),
        InputKey::Home => Some(Message::MoveCursor(Direction::RowStart)),
        InputKey::End => Some(Message::MoveCursor(Direction::RowEnd)),

        // Paint
        InputKey::Enter | InputKey::Char(' ') => Some(Message::PaintCursor),

        // Color picker
        InputKey::Char(']') | InputKey::Tab => Some(Message::NextColor),
        InputKey::Char('[') | InputKey::BackTab => Some(Message::PrevColor),
        InputKey::Char('#') => Some(Message::StartHexInput),

        // Device modes
        InputKey::Char('s') => Some(Message::ToggleShowOne),
        InputKey::Char('S') => Some(Message::RequestMode(DeviceMode::ShowTwo)),
        InputKey::Char('d') => Some(Message::RequestMode(DeviceMode::Dynamic)),
        InputKey::Char('x') => Some(Message::RequestMode(DeviceMode::Off)),

        // Sync
        InputKey::Char('r') => Some(Message::RefreshNow),

        _ => None,
    }
}

/// Handle key events while typing a hex color
fn handle_key_hex_input(key: InputKey) -> Option<Message> {
    match key {
        InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::Esc => Some(Message::CancelHexInput),
        InputKey::Enter => Some(Message::SubmitHexInput),
        InputKey::Backspace => Some(Message::HexInputBackspace),
        InputKey::Char(c) if c.is_ascii_hexdigit() || c == '#' => Some(Message::HexInputChar(c)),
        _ => None,
    }
}
