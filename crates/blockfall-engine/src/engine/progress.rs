use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Base score values for line clears, multiplied by `level + 1`.
///
/// Index corresponds to number of lines cleared simultaneously:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
pub const SCORE_TABLE: [usize; 5] = [0, 40, 100, 300, 1200];

/// Lines needed per level.
const LINES_PER_LEVEL: usize = 10;

/// Score, cleared lines, and level of a game.
///
/// # Leveling
///
/// The level rises whenever `lines_cleared > (level + 1) * 10`. A single
/// clear that crosses several thresholds raises the level once per
/// threshold, so the invariant `lines_cleared <= (level + 1) * 10` always
/// holds after [`Self::complete_piece_drop`].
///
/// # Example
///
/// ```
/// use blockfall_engine::GameProgress;
///
/// let mut progress = GameProgress::new();
/// progress.complete_piece_drop(4);
///
/// assert_eq!(progress.score(), 1200);
/// assert_eq!(progress.lines_cleared(), 4);
/// assert_eq!(progress.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameProgress {
    score: usize,
    lines_cleared: usize,
    level: usize,
    completed_pieces: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl GameProgress {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            lines_cleared: 0,
            level: 0,
            completed_pieces: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn lines_cleared(&self) -> usize {
        self.lines_cleared
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    /// Returns a histogram of locks by number of cleared lines.
    ///
    /// Index `n` counts the locks that cleared exactly `n` lines.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Interval between gravity ticks at the current level.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        tick_interval(self.level)
    }

    /// Updates score, lines, and level after a piece locks.
    ///
    /// The score uses the level before the clear. Returns the score gained.
    ///
    /// # Panics
    ///
    /// Panics if `cleared_lines` is greater than 4.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> usize {
        let gained = SCORE_TABLE[cleared_lines] * (self.level + 1);
        self.completed_pieces += 1;
        self.line_cleared_counter[cleared_lines] += 1;
        self.score += gained;
        self.lines_cleared += cleared_lines;
        while self.lines_cleared > (self.level + 1) * LINES_PER_LEVEL {
            self.level += 1;
        }
        gained
    }
}

/// Gravity interval for `level`: `1000 / (level + 1) + 200` milliseconds.
#[must_use]
pub fn tick_interval(level: usize) -> Duration {
    let millis = 1000 / u64::try_from(level + 1).unwrap_or(u64::MAX) + 200;
    Duration::from_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress_at_level(level: usize) -> GameProgress {
        GameProgress {
            level,
            lines_cleared: level * LINES_PER_LEVEL,
            ..GameProgress::new()
        }
    }

    #[test]
    fn test_score_table_level_zero() {
        for (lines, expected) in [(0, 0), (1, 40), (2, 100), (3, 300), (4, 1200)] {
            let mut progress = GameProgress::new();
            assert_eq!(progress.complete_piece_drop(lines), expected);
            assert_eq!(progress.score(), expected);
        }
    }

    #[test]
    fn test_score_table_level_one_doubles() {
        for (lines, expected) in [(1, 80), (2, 200), (3, 600), (4, 2400)] {
            let mut progress = progress_at_level(1);
            assert_eq!(progress.complete_piece_drop(lines), expected);
        }
    }

    #[test]
    fn test_score_uses_level_before_clear() {
        let mut progress = GameProgress::new();
        progress.complete_piece_drop(4);
        progress.complete_piece_drop(4);
        assert_eq!(progress.level(), 0);

        // 12 lines: scored at level 0, then level 1
        assert_eq!(progress.complete_piece_drop(4), 1200);
        assert_eq!(progress.level(), 1);
        assert_eq!(progress.lines_cleared(), 12);

        assert_eq!(progress.complete_piece_drop(1), 80);
        assert_eq!(progress.score(), 1200 * 3 + 80);
    }

    #[test]
    fn test_level_threshold_is_strict() {
        let mut progress = GameProgress::new();
        for _ in 0..10 {
            progress.complete_piece_drop(1);
        }
        assert_eq!(progress.lines_cleared(), 10);
        assert_eq!(progress.level(), 0);
        progress.complete_piece_drop(1);
        assert_eq!(progress.level(), 1);
    }

    #[test]
    fn test_level_loops_over_multiple_thresholds() {
        let mut progress = GameProgress {
            lines_cleared: 20,
            ..GameProgress::new()
        };
        progress.complete_piece_drop(4);
        // 24 lines: 24 > 10 and 24 > 20, but not > 30
        assert_eq!(progress.level(), 2);
        assert!(progress.lines_cleared() <= (progress.level() + 1) * LINES_PER_LEVEL);
    }

    #[test]
    fn test_counters() {
        let mut progress = GameProgress::new();
        for lines in [0, 0, 1, 2, 4] {
            progress.complete_piece_drop(lines);
        }
        assert_eq!(progress.completed_pieces(), 5);
        assert_eq!(progress.line_cleared_counter(), &[2, 1, 1, 0, 1]);
    }

    #[test]
    fn test_tick_interval() {
        assert_eq!(tick_interval(0), Duration::from_millis(1200));
        assert_eq!(tick_interval(1), Duration::from_millis(700));
        assert_eq!(tick_interval(2), Duration::from_millis(533));
        assert_eq!(tick_interval(9), Duration::from_millis(300));
        assert_eq!(progress_at_level(3).tick_interval(), Duration::from_millis(450));
    }
}
