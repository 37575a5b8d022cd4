//! Main render/view function (View in TEA pattern)


use ledgrid_app::{AppState, UiMode};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use super::{layout, widgets};
use crate::theme::palette;

/// Render the complete UI (View function in TEA)
///
/// Pure with respect to `state`.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Fill entire terminal with deepest background color
    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    let areas = layout::create(area, state.grid_size());

    frame.render_widget(widgets::MainHeader::new(state), areas.header);
    frame.render_widget(
        widgets::GridView::new(&state.sync)
            .cursor(state.cursor)
            .focused(state.ui_mode == UiMode::Normal),
        areas.grid,
    );
    frame.render_widget(widgets::ColorPicker::new(state), areas.picker);
    frame.render_widget(widgets::StatusBar::new(state), areas.status);
}
