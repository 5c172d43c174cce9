use std::iter;

use blockfall_engine::DisplayCell;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::BlockDisplay;

/// The well, drawn from pre-composed snapshot cells.
#[derive(Debug)]
pub(crate) struct BoardDisplay<'a> {
    cells: &'a [Vec<DisplayCell>],
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub(crate) fn new(cells: &'a [Vec<DisplayCell>]) -> Self {
        Self { cells, block: None }
    }

    pub(crate) fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn columns(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub(crate) fn width(&self) -> u16 {
        super::to_u16(self.columns()).saturating_mul(BlockDisplay::WIDTH)
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub(crate) fn height(&self) -> u16 {
        super::to_u16(self.cells.len()).saturating_mul(BlockDisplay::HEIGHT)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..self.columns()).map(|_| Constraint::Length(BlockDisplay::WIDTH));
        let row_constraints = self
            .cells
            .iter()
            .map(|_| Constraint::Length(BlockDisplay::HEIGHT));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_rows = area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        for (grid_row, row) in iter::zip(grid_rows, self.cells) {
            for (grid_cell, cell) in iter::zip(grid_row, row) {
                Widget::render(&BlockDisplay::from_cell(*cell), grid_cell, buf);
            }
        }
    }
}
