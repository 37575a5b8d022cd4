//! Terminal event polling

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ledgrid_app::{InputKey, Message};
use ledgrid_core::prelude::*;

use crate::layout::{self, ScreenAreas};

/// Convert crossterm KeyEvent to InputKey
pub fn key_event_to_input(key: crossterm::event::KeyEvent) -> Option<InputKey> {
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputKey::CharCtrl(c))
        }
        KeyCode::Char(c) => Some(InputKey::Char(c)),
        KeyCode::Enter => Some(InputKey::Enter),
        KeyCode::Esc => Some(InputKey::Esc),
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => Some(InputKey::BackTab),
        KeyCode::Tab => Some(InputKey::Tab),
        KeyCode::BackTab => Some(InputKey::BackTab),
        KeyCode::Backspace => Some(InputKey::Backspace),
        KeyCode::Up => Some(InputKey::Up),
        KeyCode::Down => Some(InputKey::Down),
        KeyCode::Left => Some(InputKey::Left),
        KeyCode::Right => Some(InputKey::Right),
        KeyCode::Home => Some(InputKey::Home),
        KeyCode::End => Some(InputKey::End),
        _ => None, // Unsupported keys ignored
    }
}

/// Convert a left click on an LED into a paint request
pub fn mouse_event_to_message(
    mouse: MouseEvent,
    areas: &ScreenAreas,
    grid_size: usize,
) -> Option<Message> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            layout::cell_at(areas.grid, grid_size, mouse.column, mouse.row)
                .map(Message::CellClicked)
        }
        _ => None,
    }
}

/// Poll for terminal events with timeout
///
/// `areas` must describe the frame that was just drawn so clicks land on the
/// cell the user sees.
pub fn poll(areas: &ScreenAreas, grid_size: usize) -> Result<Option<Message>> {
    // Poll with 50ms timeout (20 FPS)
    if event::poll(Duration::from_millis(50))? {
        let message = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                key_event_to_input(key).map(Message::Key)
            }
            Event::Mouse(mouse) => mouse_event_to_message(mouse, areas, grid_size),
            _ => None,
        };
        Ok(message)
    } else {
        // Tick on timeout expires the status line
        Ok(Some(Message::Tick))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use ledgrid_core::Coordinate;
    use ratatui::layout::Rect;

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_char_conversion() {
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(key_event_to_input(key), Some(InputKey::Char('a')));
    }

    #[test]
    fn test_char_with_ctrl_conversion() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_event_to_input(key), Some(InputKey::CharCtrl('c')));
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(
            key_event_to_input(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)),
            Some(InputKey::Up)
        );
        assert_eq!(
            key_event_to_input(KeyEvent::new(KeyCode::Home, KeyModifiers::NONE)),
            Some(InputKey::Home)
        );
    }

    #[test]
    fn test_backtab_with_shift() {
        let key = KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT);
        assert_eq!(key_event_to_input(key), Some(InputKey::BackTab));
    }

    #[test]
    fn test_uppercase_letters() {
        let key = KeyEvent::new(KeyCode::Char('S'), KeyModifiers::SHIFT);
        assert_eq!(key_event_to_input(key), Some(InputKey::Char('S')));
    }

    #[test]
    fn test_unsupported_key_returns_none() {
        let key = KeyEvent::new(KeyCode::Insert, KeyModifiers::NONE);
        assert_eq!(key_event_to_input(key), None);
    }

    #[test]
    fn test_left_click_on_cell() {
        let areas = layout::create(Rect::new(0, 0, 80, 24), 8);
        let cell = layout::cell_rect(areas.grid, Coordinate::new(2, 5));

        let msg = mouse_event_to_message(click(cell.x + 1, cell.y + 1), &areas, 8);
        assert!(matches!(
            msg,
            Some(Message::CellClicked(c)) if c == Coordinate::new(2, 5)
        ));
    }

    #[test]
    fn test_click_outside_grid_ignored() {
        let areas = layout::create(Rect::new(0, 0, 80, 24), 8);
        assert!(mouse_event_to_message(click(60, 10), &areas, 8).is_none());
    }

    #[test]
    fn test_other_mouse_events_ignored() {
        let areas = layout::create(Rect::new(0, 0, 80, 24), 8);
        let cell = layout::cell_rect(areas.grid, Coordinate::new(0, 0));
        let mut event = click(cell.x, cell.y);
        event.kind = MouseEventKind::Down(MouseButton::Right);
        assert!(mouse_event_to_message(event, &areas, 8).is_none());
        event.kind = MouseEventKind::Moved;
        assert!(mouse_event_to_message(event, &areas, 8).is_none());
    }
}
