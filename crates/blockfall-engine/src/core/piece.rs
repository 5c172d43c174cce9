use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::{PieceCollisionError, SpawnCollisionError};

use super::{
    board::Board,
    shape::{ShapeKind, ShapeMatrix},
};

/// Top-left offset of a piece matrix within the board.
///
/// Coordinates are signed: a matrix whose leftmost column is empty may sit at
/// `x = -1`, and cells above the board have negative `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Add for Position {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Position {
    pub const ZERO: Self = Self::new(0, 0);

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Absolute board coordinates of the matrix cell `(dx, dy)`.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn offset(self, dx: usize, dy: usize) -> (i32, i32) {
        // matrix coordinates are below ShapeMatrix::MAX_SIZE
        (self.x + dx as i32, self.y + dy as i32)
    }
}

/// Result of moving the active piece down by one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum DropOutcome {
    /// The piece moved down one row.
    Moved,
    /// The piece could not move and is now locked.
    Locked,
    /// The piece could not move while still touching the top row.
    ToppedOut,
}

/// The piece currently controlled by the player.
///
/// The piece kind is stored explicitly alongside the (possibly rotated)
/// matrix, so merging never has to reconstruct it.
///
/// # Example
///
/// ```
/// use blockfall_engine::{ActivePiece, Board, BoardSize, Position, ShapeKind};
///
/// let board = Board::new(BoardSize::STANDARD);
/// let mut piece = ActivePiece::spawn(ShapeKind::I, &board).unwrap();
/// assert_eq!(piece.position(), Position::new(3, 0));
///
/// let rows = piece.hard_drop(&board);
/// assert_eq!(rows, 19);
/// assert!(piece.is_locked());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    kind: ShapeKind,
    matrix: ShapeMatrix,
    position: Position,
    locked: bool,
}

impl ActivePiece {
    /// Places a new piece of `kind` horizontally centered on the top row.
    ///
    /// Fails when the spawn placement already collides, which ends the game.
    pub fn spawn(kind: ShapeKind, board: &Board) -> Result<Self, SpawnCollisionError> {
        let matrix = kind.matrix();
        let half_board = i32::try_from(board.width() / 2).map_err(|_| SpawnCollisionError)?;
        let (half_matrix, _) = Position::ZERO.offset(matrix.width() / 2, 0);
        let position = Position::new(half_board - half_matrix, 0);
        if board.is_colliding(matrix, position, Position::ZERO) {
            return Err(SpawnCollisionError);
        }
        Ok(Self {
            kind,
            matrix,
            position,
            locked: false,
        })
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn matrix(&self) -> ShapeMatrix {
        self.matrix
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Occupied cells in absolute board coordinates.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.matrix
            .occupied_cells()
            .map(move |(dx, dy)| self.position.offset(dx, dy))
    }

    /// Moves the piece by `(dx, dy)` if the destination is free.
    pub fn try_translate(
        &mut self,
        board: &Board,
        dx: i32,
        dy: i32,
    ) -> Result<(), PieceCollisionError> {
        let delta = Position::new(dx, dy);
        if board.is_colliding(self.matrix, self.position, delta) {
            return Err(PieceCollisionError);
        }
        self.position = self.position + delta;
        Ok(())
    }

    /// Rotates the piece 90° clockwise, kicking it sideways if needed.
    ///
    /// When the rotated matrix collides in place, horizontal steps of
    /// `+1, -2, +3, -4, ...` are applied cumulatively (testing offsets
    /// `+1, -1, +2, -2, ...`). The search stops as soon as the next step
    /// would exceed the rotated matrix width, before the placement just
    /// reached is tested, so a width-4 matrix tries `0, +1, -1, +2` only.
    /// On failure the piece is unchanged.
    pub fn try_rotate(&mut self, board: &Board) -> Result<(), PieceCollisionError> {
        let rotated = self.matrix.rotated_right();
        let limit = i32::try_from(rotated.width()).map_err(|_| PieceCollisionError)?;

        let mut position = self.position;
        let mut step: i32 = 1;
        while board.is_colliding(rotated, position, Position::ZERO) {
            position.x += step;
            step = -(step + step.signum());
            if step > limit {
                return Err(PieceCollisionError);
            }
        }

        self.matrix = rotated;
        self.position = position;
        Ok(())
    }

    /// Moves the piece down one row, locking it if the row below is blocked.
    pub fn soft_drop(&mut self, board: &Board) -> DropOutcome {
        if self.try_translate(board, 0, 1).is_ok() {
            return DropOutcome::Moved;
        }
        if self.position.y < 1 {
            return DropOutcome::ToppedOut;
        }
        self.locked = true;
        DropOutcome::Locked
    }

    /// Position the piece would land on if dropped straight down.
    #[must_use]
    pub fn drop_position(&self, board: &Board) -> Position {
        let mut dy = 0;
        while !board.is_colliding(self.matrix, self.position, Position::new(0, dy + 1)) {
            dy += 1;
        }
        Position::new(self.position.x, self.position.y + dy)
    }

    /// Drops the piece to its landing row and locks it.
    ///
    /// Returns the number of rows the piece moved.
    pub fn hard_drop(&mut self, board: &Board) -> usize {
        let landing = self.drop_position(board);
        let rows = landing.y - self.position.y;
        self.position = landing;
        self.locked = true;
        usize::try_from(rows).unwrap_or_default()
    }
}
