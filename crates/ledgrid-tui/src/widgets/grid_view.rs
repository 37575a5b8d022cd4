//! LED grid widget
//!
//! Every LED is drawn as a `CELL_WIDTH` x `CELL_HEIGHT` block filled with its
//! color. The cursor is bracketed and cells with a write in flight carry a dot.

use ledgrid_app::SyncController;
use ledgrid_core::Coordinate;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Widget},
};

use crate::layout::{self, CELL_WIDTH};
use crate::theme::styles;

pub struct GridView<'a> {
    sync: &'a SyncController,
    cursor: Option<Coordinate>,
    focused: bool,
}

impl<'a> GridView<'a> {
    pub fn new(sync: &'a SyncController) -> Self {
        Self {
            sync,
            cursor: None,
            focused: true,
        }
    }

    pub fn cursor(mut self, cursor: Coordinate) -> Self {
        self.cursor = Some(cursor);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for GridView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block: Block = styles::glass_block(self.focused).title(" Grid ");
        block.render(area, buf);

        for (coord, color) in self.sync.grid().iter() {
            let cell = layout::cell_rect(area, coord);
            if cell.is_empty() {
                continue;
            }

            let style = styles::led_swatch(color);
            buf.set_style(cell, style);

            if self.cursor == Some(coord) && cell.width >= CELL_WIDTH {
                buf.set_string(cell.x, cell.y, "[", style);
                buf.set_string(cell.x + CELL_WIDTH - 1, cell.y, "]", style);
            }

            if self.sync.is_pending(coord) {
                let y = cell.y + cell.height.saturating_sub(1);
                buf.set_string(cell.x + cell.width / 2, y, "•", style);
            }
        }
    }
}
