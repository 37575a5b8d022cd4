//! Color picker panel: selected color, numbered palette and hex entry

use ledgrid_app::{AppState, UiMode};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{palette, styles};

const SWATCH: &str = "    ";

pub struct ColorPicker<'a> {
    state: &'a AppState,
}

impl<'a> ColorPicker<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let state = self.state;
        let mut lines = vec![
            Line::from(vec![
                Span::styled(" Selected ", styles::text_secondary()),
                Span::styled(SWATCH, styles::led_swatch(state.selected_color)),
                Span::styled(format!(" {}", state.selected_color), styles::text_primary()),
            ]),
            Line::default(),
        ];

        for (index, &color) in state.palette.iter().enumerate().take(9) {
            let selected = state.palette_index == Some(index);
            let marker = if selected { "▸" } else { " " };
            let label_style = if selected {
                styles::accent_bold()
            } else {
                styles::text_secondary()
            };
            lines.push(Line::from(vec![
                Span::styled(format!(" {}{} ", marker, index + 1), label_style),
                Span::styled(SWATCH, styles::led_swatch(color)),
                Span::styled(format!(" {}", color), label_style),
            ]));
        }

        lines.push(Line::default());
        lines.push(self.hex_line());
        lines
    }

    fn hex_line(&self) -> Line<'a> {
        match self.state.ui_mode {
            UiMode::HexInput => Line::from(vec![
                Span::styled(" Hex ", styles::accent_bold()),
                Span::styled(
                    format!("{}▏", self.state.hex_input),
                    Style::default()
                        .fg(palette::TEXT_PRIMARY)
                        .bg(palette::POPUP_BG),
                ),
                Span::styled("  ⏎ apply  esc cancel", styles::text_muted()),
            ]),
            UiMode::Normal => Line::from(vec![
                Span::styled(" # ", styles::keybinding()),
                Span::styled("custom hex color", styles::text_muted()),
            ]),
        }
    }
}

impl Widget for ColorPicker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let focused = self.state.ui_mode == UiMode::HexInput;
        let block = styles::glass_block(focused).title(" Color ");
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }
        Paragraph::new(self.lines()).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use ledgrid_core::Color;

    const PANEL: Rect = Rect::new(0, 0, 46, 18);

    #[test]
    fn test_picker_lists_palette() {
        let state = AppState::new();
        let mut term = TestTerminal::new();
        term.render_widget(ColorPicker::new(&state), PANEL);

        assert!(term.buffer_contains("Selected"));
        assert!(term.buffer_contains("#ff0000"));
        assert!(term.buffer_contains("▸1"));
        assert!(term.buffer_contains("9"));
    }

    #[test]
    fn test_custom_color_clears_marker() {
        let mut state = AppState::new();
        state.select_color(Color::new(0x12, 0x34, 0x56));
        let mut term = TestTerminal::new();
        term.render_widget(ColorPicker::new(&state), PANEL);

        assert!(term.buffer_contains("#123456"));
        assert!(!term.buffer_contains("▸"));
    }

    #[test]
    fn test_hex_entry_is_shown() {
        let mut state = AppState::new();
        state.ui_mode = UiMode::HexInput;
        state.hex_input = "#c0f".to_string();
        let mut term = TestTerminal::new();
        term.render_widget(ColorPicker::new(&state), PANEL);

        assert!(term.buffer_contains("#c0f"));
        assert!(term.buffer_contains("esc cancel"));
    }
}
