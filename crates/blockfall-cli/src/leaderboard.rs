use std::collections::HashSet;

/// A single leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub player_name: String,
    pub score: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SubmitError {
    #[display("name must not be empty")]
    EmptyName,
    #[display("name must be at most {} characters", Leaderboard::MAX_NAME_LEN)]
    NameTooLong,
    #[display("score already submitted for this game")]
    AlreadySubmitted,
}

/// In-memory high-score table, best score first.
///
/// Only the best [`Leaderboard::CAPACITY`] scores are kept. Entries with equal
/// scores stay in submission order.
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
    submitted_games: HashSet<usize>,
}

impl Leaderboard {
    pub const CAPACITY: usize = 10;
    pub const MAX_NAME_LEN: usize = 16;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Records the score of game number `game`.
    ///
    /// The name is trimmed before validation. Returns the 1-based rank, or
    /// `None` when the score did not make the table.
    pub fn submit(
        &mut self,
        game: usize,
        name: &str,
        score: usize,
    ) -> Result<Option<usize>, SubmitError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SubmitError::EmptyName);
        }
        if name.chars().count() > Self::MAX_NAME_LEN {
            return Err(SubmitError::NameTooLong);
        }
        if !self.submitted_games.insert(game) {
            return Err(SubmitError::AlreadySubmitted);
        }

        let index = self.entries.partition_point(|entry| entry.score >= score);
        if index >= Self::CAPACITY {
            return Ok(None);
        }
        self.entries.insert(
            index,
            ScoreEntry {
                player_name: name.to_owned(),
                score,
            },
        );
        self.entries.truncate(Self::CAPACITY);
        Ok(Some(index + 1))
    }
}
