use blockfall_engine::{DisplayCell, ShapeKind};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use super::style;

/// One board cell, two terminal columns wide.
#[derive(Debug)]
pub(crate) struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub(crate) const WIDTH: u16 = 2;
    pub(crate) const HEIGHT: u16 = 1;

    const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub(crate) fn from_cell(cell: DisplayCell) -> Self {
        match cell {
            DisplayCell::Empty => Self::new(style::EMPTY_DOT, "."),
            DisplayCell::Ghost(_) => Self::new(style::GHOST, "[]"),
            DisplayCell::Piece(kind) => Self::new(kind_style(kind), ""),
        }
    }
}

fn kind_style(kind: ShapeKind) -> Style {
    match kind {
        ShapeKind::I => style::I_BLOCK,
        ShapeKind::O => style::O_BLOCK,
        ShapeKind::S => style::S_BLOCK,
        ShapeKind::Z => style::Z_BLOCK,
        ShapeKind::J => style::J_BLOCK,
        ShapeKind::L => style::L_BLOCK,
        ShapeKind::T => style::T_BLOCK,
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // a Paragraph fills the whole area, not just the cells under the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
