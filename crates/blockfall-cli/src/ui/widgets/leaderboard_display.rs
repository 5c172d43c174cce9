use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::style;
use crate::leaderboard::{Leaderboard, ScoreEntry};

const EMPTY_MESSAGE: &str = "No scores yet.";
const EMPTY_HINT: &str = "Be the first!";

/// Ranked high-score table, best first.
#[derive(Debug)]
pub(crate) struct LeaderboardDisplay<'a> {
    entries: &'a [ScoreEntry],
    block: Option<BlockWidget<'a>>,
}

impl<'a> LeaderboardDisplay<'a> {
    pub(crate) fn new(entries: &'a [ScoreEntry]) -> Self {
        Self {
            entries,
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
        // rank, name and a score column
        super::to_u16(4 + Leaderboard::MAX_NAME_LEN + 8)
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub(crate) fn height(&self) -> u16 {
        super::to_u16(Leaderboard::CAPACITY) + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for LeaderboardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        if self.entries.is_empty() {
            let [message_area, hint_area] =
                area.layout(&Layout::vertical([Constraint::Length(1); 2]));
            Line::styled(EMPTY_MESSAGE, style::DIM)
                .centered()
                .render(message_area, buf);
            Line::styled(EMPTY_HINT, style::DIM)
                .centered()
                .render(hint_area, buf);
            return;
        }

        let rows = Layout::vertical(self.entries.iter().map(|_| Constraint::Length(1)));
        for (rank, (entry, row_area)) in self
            .entries
            .iter()
            .zip(area.layout_vec(&rows))
            .enumerate()
        {
            let [name_area, score_area] = row_area.layout(&Layout::horizontal([
                Constraint::Fill(1),
                Constraint::Length(8),
            ]));
            Line::from(vec![
                Span::styled(format!("{:>2}. ", rank + 1), style::DIM),
                Span::styled(entry.player_name.as_str(), style::DEFAULT),
            ])
            .render(name_area, buf);
            Line::styled(entry.score.to_string(), style::DEFAULT)
                .right_aligned()
                .render(score_area, buf);
        }
    }
}
