//! Header bar widget
//!
//! Shows the app title, the device address, the active device mode and the
//! sync indicator.

use ledgrid_app::AppState;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::styles;

pub struct MainHeader<'a> {
    state: &'a AppState,
}

impl<'a> MainHeader<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn title_spans(&self) -> Vec<Span<'a>> {
        let mut spans = vec![
            Span::styled(" LED Grid ", styles::accent_bold()),
            Span::styled("│ ", styles::text_muted()),
            Span::styled(
                self.state.settings.device.base_url.as_str(),
                styles::text_secondary(),
            ),
        ];

        if let Some(mode) = self.state.active_mode {
            spans.push(Span::styled("  ▶ ", styles::keybinding()));
            spans.push(Span::styled(mode.label(), styles::keybinding()));
        } else if let Some(requested) = self.state.mode_request {
            spans.push(Span::styled("  … ", styles::text_muted()));
            spans.push(Span::styled(requested.label(), styles::text_muted()));
        }

        spans
    }

    fn sync_spans(&self) -> Vec<Span<'a>> {
        let sync = &self.state.sync;
        let (icon, label, style) = styles::sync_indicator(sync.is_healthy(), sync.is_polling());

        let mut spans = Vec::new();
        if sync.pending_count() > 0 {
            spans.push(Span::styled(
                format!("{} pending  ", sync.pending_count()),
                styles::text_muted(),
            ));
        }
        spans.push(Span::styled(format!("{} {} ", icon, label), style));
        spans
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let row = Rect { height: 1, ..inner };
        let sync = Line::from(self.sync_spans());
        let sync_width = u16::try_from(sync.width()).unwrap_or(row.width);
        let [title_area, sync_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(sync_width)]).areas(row);

        Paragraph::new(Line::from(self.title_spans())).render(title_area, buf);
        Paragraph::new(sync)
            .alignment(Alignment::Right)
            .render(sync_area, buf);
    }
}
