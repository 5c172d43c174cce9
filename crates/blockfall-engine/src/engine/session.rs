use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ActivePiece, Board, BoardSize, DropOutcome, ShapeKind};

use super::{
    next_piece::{NextPieceQueue, PieceSeed},
    progress::GameProgress,
    snapshot::{self, Snapshot},
};

/// Lifecycle state of a [`GameSession`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, derive_more::Display, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No game has been started yet.
    #[display("idle")]
    Idle,
    /// The previous piece has settled and the next one is being placed.
    #[display("spawning")]
    Spawning,
    /// A piece is falling and input is accepted.
    #[display("falling")]
    Falling,
    /// Gravity and movement are suspended.
    #[display("paused")]
    Paused,
    /// The last spawn collided or a piece topped out.
    #[display("game over")]
    GameOver,
}

/// Discrete player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    TogglePause,
    Start,
}

impl Command {
    pub const ALL: [Self; 7] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::Rotate,
        Command::HardDrop,
        Command::TogglePause,
        Command::Start,
    ];
}

/// One player's game: board, progress, active piece and next-piece queue.
///
/// The session is driven from outside by two entry points: [`Self::tick`]
/// for gravity and [`Self::apply`] for player commands. Both are
/// synchronous; after either, [`Self::snapshot`] reflects the new state.
///
/// # Example
///
/// ```
/// use blockfall_engine::{BoardSize, Command, GameSession, SessionState};
///
/// let mut session = GameSession::new(BoardSize::STANDARD);
/// assert_eq!(session.state(), SessionState::Idle);
/// assert!(session.tick_interval().is_none());
///
/// session.apply(Command::Start);
/// assert_eq!(session.state(), SessionState::Falling);
///
/// session.apply(Command::HardDrop);
/// assert_eq!(session.progress().completed_pieces(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    progress: GameProgress,
    queue: NextPieceQueue,
    active: Option<ActivePiece>,
    state: SessionState,
    show_ghost: bool,
    games_started: usize,
    leaderboard_revision: u64,
}

impl GameSession {
    /// Creates an idle session with a random piece seed.
    #[must_use]
    pub fn new(size: BoardSize) -> Self {
        Self::with_queue(size, NextPieceQueue::new())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(size: BoardSize, seed: PieceSeed) -> Self {
        Self::with_queue(size, NextPieceQueue::with_seed(seed))
    }

    fn with_queue(size: BoardSize, queue: NextPieceQueue) -> Self {
        Self {
            board: Board::new(size),
            progress: GameProgress::new(),
            queue,
            active: None,
            state: SessionState::Idle,
            show_ghost: true,
            games_started: 0,
            leaderboard_revision: 0,
        }
    }

    /// Enables or disables ghost cells in snapshots.
    #[must_use]
    pub fn with_ghost(mut self, show_ghost: bool) -> Self {
        self.show_ghost = show_ghost;
        self
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn progress(&self) -> &GameProgress {
        &self.progress
    }

    #[must_use]
    pub fn active_piece(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn next_piece(&self) -> ShapeKind {
        self.queue.peek()
    }

    /// Number of games started with [`Command::Start`].
    #[must_use]
    pub fn games_started(&self) -> usize {
        self.games_started
    }

    /// Counter bumped by [`Self::notify_score_submitted`].
    #[must_use]
    pub fn leaderboard_revision(&self) -> u64 {
        self.leaderboard_revision
    }

    /// Gravity interval, or `None` when no tick should be scheduled.
    ///
    /// Only a falling piece is subject to gravity, so the interval is `None`
    /// while idle, paused, or after game over.
    #[must_use]
    pub fn tick_interval(&self) -> Option<Duration> {
        self.state
            .is_falling()
            .then(|| self.progress.tick_interval())
    }

    /// The score to submit, available once the game is over.
    #[must_use]
    pub fn final_score(&self) -> Option<usize> {
        self.state.is_game_over().then_some(self.progress.score())
    }

    /// Records that the final score was stored externally.
    ///
    /// Only the revision counter changes, so renderers can refresh a
    /// leaderboard view.
    pub fn notify_score_submitted(&mut self) {
        self.leaderboard_revision += 1;
    }

    /// Advances gravity by one step.
    ///
    /// Ignored unless a piece is falling.
    pub fn tick(&mut self) {
        if self.state.is_falling() {
            self.drop_one_row();
        }
    }

    /// Applies a player command.
    ///
    /// Commands that do not apply to the current state are ignored, as are
    /// moves that would collide.
    pub fn apply(&mut self, command: Command) {
        match (self.state, command) {
            (SessionState::Idle | SessionState::GameOver, Command::Start) => self.start(),
            (SessionState::Falling, Command::TogglePause) => self.state = SessionState::Paused,
            (SessionState::Paused, Command::TogglePause) => self.state = SessionState::Falling,
            (SessionState::Falling, Command::MoveLeft) => self.translate(-1),
            (SessionState::Falling, Command::MoveRight) => self.translate(1),
            (SessionState::Falling, Command::Rotate) => self.rotate(),
            (SessionState::Falling, Command::SoftDrop) => self.drop_one_row(),
            (SessionState::Falling, Command::HardDrop) => self.hard_drop(),
            _ => {}
        }
    }

    /// Builds a read-only view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cells: snapshot::compose_cells(&self.board, self.active.as_ref(), self.show_ghost),
            progress: self.progress.clone(),
            next: self.queue.peek(),
            state: self.state,
            final_score: self.final_score(),
            leaderboard_revision: self.leaderboard_revision,
        }
    }

    fn start(&mut self) {
        self.board = Board::new(self.board.size());
        self.progress = GameProgress::new();
        self.queue.refill();
        self.games_started += 1;
        self.spawn_next();
    }

    fn translate(&mut self, dx: i32) {
        if let Some(piece) = &mut self.active {
            let _ = piece.try_translate(&self.board, dx, 0);
        }
    }

    fn rotate(&mut self) {
        if let Some(piece) = &mut self.active {
            let _ = piece.try_rotate(&self.board);
        }
    }

    fn drop_one_row(&mut self) {
        let Some(piece) = &mut self.active else {
            return;
        };
        match piece.soft_drop(&self.board) {
            DropOutcome::Moved => {}
            DropOutcome::Locked => {
                let piece = *piece;
                self.settle(piece);
            }
            DropOutcome::ToppedOut => self.state = SessionState::GameOver,
        }
    }

    fn hard_drop(&mut self) {
        let Some(piece) = &mut self.active else {
            return;
        };
        piece.hard_drop(&self.board);
        let piece = *piece;
        self.settle(piece);
    }

    /// Merges a locked piece, clears rows, scores, and spawns the next piece.
    fn settle(&mut self, piece: ActivePiece) {
        debug_assert!(piece.is_locked());
        self.board
            .merge(piece.matrix(), piece.position(), piece.kind());
        let cleared_lines = self.board.sweep_and_compact();
        self.progress.complete_piece_drop(cleared_lines);
        self.state = SessionState::Spawning;
        self.spawn_next();
    }

    fn spawn_next(&mut self) {
        let kind = self.queue.pop_next();
        match ActivePiece::spawn(kind, &self.board) {
            Ok(piece) => {
                self.active = Some(piece);
                self.state = SessionState::Falling;
            }
            Err(_) => {
                self.active = None;
                self.state = SessionState::GameOver;
            }
        }
    }
}
