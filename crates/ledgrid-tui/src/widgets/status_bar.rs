//! Bottom status line
//!
//! Shows the current status message while it is visible, key hints
//! otherwise, and the time of the last successful sync on the right.

use std::time::Instant;

use ledgrid_app::{AppState, UiMode};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::styles;

const NORMAL_HINTS: &[(&str, &str)] = &[
    ("←↑↓→", "move"),
    ("⏎", "paint"),
    ("[ ]", "color"),
    ("s/S/d/x", "modes"),
    ("r", "sync"),
    ("q", "quit"),
];

const HEX_HINTS: &[(&str, &str)] = &[("⏎", "apply"), ("esc", "cancel")];

pub struct StatusBar<'a> {
    state: &'a AppState,
    now: Instant,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self {
            state,
            now: Instant::now(),
        }
    }

    fn message_line(&self) -> Line<'a> {
        if let Some(message) = self.state.status.current_at(self.now) {
            return Line::from(Span::styled(
                format!(" {}", message.text),
                styles::status_message(message.level),
            ));
        }

        let hints = match self.state.ui_mode {
            UiMode::Normal => NORMAL_HINTS,
            UiMode::HexInput => HEX_HINTS,
        };
        let mut spans = vec![Span::raw(" ")];
        for (key, action) in hints {
            spans.push(Span::styled(*key, styles::keybinding()));
            spans.push(Span::styled(format!(" {}  ", action), styles::text_muted()));
        }
        Line::from(spans)
    }

    fn sync_line(&self) -> Line<'a> {
        match self.state.last_sync {
            Some(at) => Line::from(Span::styled(
                format!("synced {} ", at.format("%H:%M:%S")),
                styles::text_muted(),
            )),
            None => Line::from(Span::styled("never synced ", styles::text_muted())),
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let sync = self.sync_line();
        let sync_width = u16::try_from(sync.width()).unwrap_or(area.width);
        let [message_area, sync_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(sync_width)]).areas(area);

        Paragraph::new(self.message_line()).render(message_area, buf);
        Paragraph::new(sync)
            .alignment(Alignment::Right)
            .render(sync_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    const LINE: Rect = Rect::new(0, 0, 80, 1);

    #[test]
    fn test_hints_when_idle() {
        let state = AppState::new();
        let mut term = TestTerminal::new();
        term.render_widget(StatusBar::new(&state), LINE);

        assert!(term.line_contains(0, "paint"));
        assert!(term.line_contains(0, "never synced"));
    }

    #[test]
    fn test_status_message_replaces_hints() {
        let mut state = AppState::new();
        state.status.error("Failed to update LED (0, 0): device unreachable");
        let mut term = TestTerminal::new();
        term.render_widget(StatusBar::new(&state), LINE);

        assert!(term.line_contains(0, "Failed to update LED (0, 0)"));
        assert!(!term.line_contains(0, "paint"));
    }

    #[test]
    fn test_expired_message_falls_back_to_hints() {
        let mut state = AppState::new();
        let long_ago = Instant::now() - std::time::Duration::from_secs(10);
        state
            .status
            .notify_at("old news", ledgrid_app::StatusLevel::Info, long_ago);
        let mut term = TestTerminal::new();
        term.render_widget(StatusBar::new(&state), LINE);

        assert!(!term.line_contains(0, "old news"));
        assert!(term.line_contains(0, "quit"));
    }

    #[test]
    fn test_last_sync_time() {
        let mut state = AppState::new();
        state.last_sync = Some(chrono::Local::now());
        let mut term = TestTerminal::new();
        term.render_widget(StatusBar::new(&state), LINE);

        assert!(term.line_contains(0, "synced "));
        assert!(!term.line_contains(0, "never"));
    }
}
