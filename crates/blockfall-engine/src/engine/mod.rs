//! Game engine logic and state management.
//!
//! This module ties the core data structures together into a playable game:
//!
//! - [`GameSession`] - Tick/input state machine owning board, progress and pieces
//! - [`GameProgress`] - Score, cleared lines, level and gravity interval
//! - [`NextPieceQueue`] - Single-slot uniform piece lookahead
//! - [`PieceSeed`] - Seed for deterministic piece generation
//! - [`Snapshot`] - Read-only view handed to renderers
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] (idle) and send [`Command::Start`]
//! 2. Call [`GameSession::tick`] every [`GameSession::tick_interval`]
//! 3. Forward player input with [`GameSession::apply`]
//! 4. A piece that can no longer fall is merged, full rows are cleared and
//!    scored, and the next piece spawns
//! 5. The game is over when a new piece collides at spawn or a piece locks
//!    while still touching the top row
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{BoardSize, Command, GameSession, PieceSeed};
//!
//! let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
//! let mut session = GameSession::with_seed(BoardSize::STANDARD, seed);
//! session.apply(Command::Start);
//!
//! while session.final_score().is_none() {
//!     session.apply(Command::HardDrop);
//! }
//! println!("{}", session.snapshot().to_ascii());
//! ```

pub use self::{next_piece::*, progress::*, session::*, snapshot::*};

mod next_piece;
mod progress;
mod session;
mod snapshot;
