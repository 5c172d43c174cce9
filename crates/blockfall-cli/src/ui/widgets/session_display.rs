use blockfall_engine::{SessionState, Snapshot};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use super::{BoardDisplay, LeaderboardDisplay, NextPieceDisplay, StatsDisplay, color, style};
use crate::{
    command::play::app::NameEntry,
    leaderboard::{Leaderboard, ScoreEntry},
};

/// Whole play screen: stats, board, next piece, leaderboard and state overlays.
#[derive(Debug)]
pub(crate) struct SessionDisplay<'a> {
    snapshot: &'a Snapshot,
    leaderboard: &'a [ScoreEntry],
    name_entry: &'a NameEntry,
}

impl<'a> SessionDisplay<'a> {
    pub(crate) fn new(
        snapshot: &'a Snapshot,
        leaderboard: &'a [ScoreEntry],
        name_entry: &'a NameEntry,
    ) -> Self {
        Self {
            snapshot,
            leaderboard,
            name_entry,
        }
    }

    pub(crate) fn height(&self) -> u16 {
        let left = self.stats().height();
        let right = self.next_piece().height() + 1 + self.leaderboard().height();
        self.board().height().max(left).max(right)
    }

    fn border_color(&self) -> Color {
        match self.snapshot.state {
            SessionState::Idle => color::CYAN,
            SessionState::Spawning | SessionState::Falling => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        }
    }

    fn panel(&self, title: &'static str) -> Block<'static> {
        Block::bordered()
            .title(Line::from(title).centered())
            .padding(Padding::horizontal(1))
            .border_style(self.border_color())
            .style(style::DEFAULT)
    }

    fn board(&self) -> BoardDisplay<'a> {
        BoardDisplay::new(&self.snapshot.cells).block(
            Block::bordered()
                .border_style(self.border_color())
                .style(style::DEFAULT),
        )
    }

    fn stats(&self) -> StatsDisplay<'a> {
        StatsDisplay::new(&self.snapshot.progress).block(self.panel("STATS"))
    }

    fn next_piece(&self) -> NextPieceDisplay<'a> {
        NextPieceDisplay::new(self.snapshot.next).block(self.panel("NEXT"))
    }

    fn leaderboard(&self) -> LeaderboardDisplay<'a> {
        LeaderboardDisplay::new(self.leaderboard).block(self.panel("LEADERBOARD"))
    }

    fn popup(&self) -> Option<(Text<'a>, Style)> {
        let lines: Vec<Line> = match self.snapshot.state {
            SessionState::Spawning | SessionState::Falling => return None,
            SessionState::Idle => {
                let lines = vec![
                    Line::from("BLOCKFALL"),
                    Line::default(),
                    Line::from("Press Enter to start"),
                ];
                return Some((Text::from(lines), style::START_POPUP));
            }
            SessionState::Paused => vec![Line::from("PAUSED")],
            SessionState::GameOver => {
                let score = self.snapshot.final_score.unwrap_or_default();
                let mut lines = vec![
                    Line::from("GAME OVER!!"),
                    Line::from(format!("Score: {score}")),
                    Line::default(),
                ];
                match self.name_entry {
                    NameEntry::Editing { name, error } => {
                        lines.push(Line::from("Enter your name:"));
                        lines.push(Line::from(format!("{name}_")));
                        if let Some(error) = error {
                            lines.push(Line::styled(error.to_string(), style::ERROR));
                        }
                    }
                    NameEntry::Submitted { rank: Some(rank) } => {
                        lines.push(Line::from(format!("Saved as #{rank}")));
                    }
                    NameEntry::Submitted { rank: None } => {
                        lines.push(Line::from(format!(
                            "Score did not make the top {}",
                            Leaderboard::CAPACITY
                        )));
                    }
                    NameEntry::Skipped => lines.push(Line::from("Score not saved")),
                }
                lines
            }
        };
        let style = match self.snapshot.state {
            SessionState::Paused => style::PAUSE_POPUP,
            _ => style::GAME_OVER_POPUP,
        };
        Some((Text::from(lines), style))
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let game_board = self.board();
        let stats = self.stats();
        let next_piece = self.next_piece();
        let leaderboard = self.leaderboard();

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(u16::max(next_piece.width(), leaderboard.width())),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area, leaderboard_area] = Layout::vertical([
            Constraint::Length(next_piece.height()),
            Constraint::Length(leaderboard.height()),
        ])
        .spacing(1)
        .areas(right_column);
        let next_area = next_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(next_piece.width())]).flex(Flex::Start),
        )[0];

        let game_board_width = game_board.width();
        let popup = self.popup();

        stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_piece.render(next_area, buf);
        leaderboard.render(leaderboard_area, buf);

        if let Some((text, style)) = popup {
            let block = Block::new().padding(Padding::uniform(1)).style(style);
            let text = text.style(style).centered();
            let width = u16::max(
                game_board_width,
                super::to_u16(text.width()) + super::block_horizontal_margin(Some(&block)),
            );
            let height =
                super::to_u16(text.lines.len()) + super::block_vertical_margin(Some(&block));
            let popup_area = board_area.centered_vertically(Constraint::Length(height));
            let center_x = board_area.x + board_area.width / 2;
            let popup_area = Rect {
                x: center_x.saturating_sub(width / 2),
                width,
                ..popup_area
            }
            .intersection(area);
            let inner = block.inner(popup_area);
            Clear.render(popup_area, buf);
            block.render(popup_area, buf);
            text.render(inner, buf);
        }
    }
}
