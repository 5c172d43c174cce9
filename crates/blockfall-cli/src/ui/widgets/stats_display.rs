use blockfall_engine::GameProgress;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::style;

/// Scoreboard panel: score, level, lines and clear counts.
pub(crate) struct StatsDisplay<'a> {
    progress: &'a GameProgress,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    const INNER_WIDTH: u16 = 20;

    pub(crate) fn new(progress: &'a GameProgress) -> Self {
        Self {
            progress,
            block: None,
        }
    }

    pub(crate) fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub(crate) fn width(&self) -> u16 {
        Self::INNER_WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub(crate) fn height(&self) -> u16 {
        super::to_u16(STATS.len()) + super::block_vertical_margin(self.block.as_ref())
    }
}

/// A labelled counter, or `None` for a spacer line.
type Stat = Option<(&'static str, fn(&GameProgress) -> usize)>;

const STATS: &[Stat] = &[
    Some(("SCORE", GameProgress::score)),
    Some(("LEVEL", GameProgress::level)),
    Some(("LINES", GameProgress::lines_cleared)),
    None,
    Some(("PIECES", GameProgress::completed_pieces)),
    Some(("SINGLES", |progress| progress.line_cleared_counter()[1])),
    Some(("DOUBLES", |progress| progress.line_cleared_counter()[2])),
    Some(("TRIPLES", |progress| progress.line_cleared_counter()[3])),
    Some(("TETRIS", |progress| progress.line_cleared_counter()[4])),
];

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let rows = Layout::vertical(STATS.iter().map(|_| Constraint::Length(1)));
        for (stat, row_area) in STATS.iter().zip(area.layout_vec(&rows)) {
            let Some((label, value)) = stat else {
                continue;
            };
            let value = value(self.progress).to_string();
            let padding = usize::from(row_area.width).saturating_sub(label.len() + value.len());
            Line::from(vec![
                Span::styled(*label, style::DIM),
                Span::raw(" ".repeat(padding)),
                Span::styled(value, style::DEFAULT),
            ])
            .render(row_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_right_aligned() {
        let progress = GameProgress::new();
        let display = StatsDisplay::new(&progress);
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);

        let row = |y: u16| -> String {
            (0..area.width)
                .map(|x| buf[(x, y)].symbol().to_owned())
                .collect()
        };
        assert_eq!(row(0), format!("SCORE{}0", " ".repeat(14)));
        assert_eq!(row(3).trim(), "");
        assert!(row(8).starts_with("TETRIS"));
    }
}
