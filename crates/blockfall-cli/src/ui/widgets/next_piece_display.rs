use blockfall_engine::{DisplayCell, ShapeKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::BlockDisplay;

/// Preview of the upcoming piece, centered in a fixed 4x2 grid.
#[derive(Debug)]
pub(crate) struct NextPieceDisplay<'a> {
    kind: ShapeKind,
    block: Option<BlockWidget<'a>>,
}

impl<'a> NextPieceDisplay<'a> {
    const GRID_WIDTH: u16 = 4;
    const GRID_HEIGHT: u16 = 2;

    pub(crate) fn new(kind: ShapeKind) -> Self {
        Self { kind, block: None }
    }

    pub(crate) fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub(crate) fn width(&self) -> u16 {
        Self::GRID_WIDTH * BlockDisplay::WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub(crate) fn height(&self) -> u16 {
        Self::GRID_HEIGHT * BlockDisplay::HEIGHT
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for NextPieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let matrix = self.kind.matrix();
        let (w, h) = (super::to_u16(matrix.width()), super::to_u16(matrix.height()));
        let piece_area = area.centered(
            Constraint::Length(w * BlockDisplay::WIDTH),
            Constraint::Length(h * BlockDisplay::HEIGHT),
        );

        let horizontal = Layout::horizontal((0..w).map(|_| Constraint::Length(BlockDisplay::WIDTH)))
            .flex(Flex::Center);
        let vertical = Layout::vertical((0..h).map(|_| Constraint::Length(BlockDisplay::HEIGHT)));

        let occupied = BlockDisplay::from_cell(DisplayCell::Piece(self.kind));
        for (y, grid_row) in piece_area.layout_vec(&vertical).into_iter().enumerate() {
            for (x, grid_cell) in grid_row.layout_vec(&horizontal).into_iter().enumerate() {
                if matrix.is_occupied(x, y) {
                    Widget::render(&occupied, grid_cell, buf);
                }
            }
        }
    }
}
