use std::fmt;

use serde::{Deserialize, Serialize};

use crate::BoardSizeError;

use super::{
    piece::Position,
    shape::{ShapeKind, ShapeMatrix},
};

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum Cell {
    /// Empty cell (no piece).
    #[default]
    Empty,
    /// Locked piece of a specific type.
    Filled(ShapeKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Board dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct BoardSize {
    width: usize,
    height: usize,
}

impl Default for BoardSize {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl BoardSize {
    /// Standard 10×20 playfield.
    pub const STANDARD: Self = Self {
        width: 10,
        height: 20,
    };

    pub fn new(width: usize, height: usize) -> Result<Self, BoardSizeError> {
        if width == 0 || height == 0 {
            return Err(BoardSizeError { width, height });
        }
        Ok(Self { width, height })
    }

    #[must_use]
    pub const fn width(self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(self) -> usize {
        self.height
    }
}

/// Fixed-size grid of locked cells.
///
/// Row 0 is the top of the board and row `height - 1` is the bottom. The
/// dimensions never change after creation: clearing rows inserts empty rows at
/// the top so the row count stays the same.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Cell, ShapeKind};
///
/// let mut board = Board::create(4, 3).unwrap();
/// for x in 0..4 {
///     board.set_cell(x, 2, Cell::Filled(ShapeKind::I));
/// }
/// assert!(board.is_row_full(2));
/// assert_eq!(board.sweep_and_compact(), 1);
/// assert!(board.rows().flatten().all(|cell| cell.is_empty()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: BoardSize,
    rows: Vec<Vec<Cell>>,
}

impl Board {
    /// Creates an empty board of the given size.
    #[must_use]
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            rows: vec![vec![Cell::Empty; size.width()]; size.height()],
        }
    }

    /// Creates an empty board of `width` columns and `height` rows.
    pub fn create(width: usize, height: usize) -> Result<Self, BoardSizeError> {
        Ok(Self::new(BoardSize::new(width, height)?))
    }

    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.size.width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.size.height()
    }

    /// Returns the cell at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the board.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.rows[y][x]
    }

    /// Overwrites the cell at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the board.
    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        self.rows[y][x] = cell;
    }

    #[must_use]
    pub fn is_empty_at(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_empty()
    }

    /// Returns an iterator over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Checks if every cell of the row is occupied.
    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows[row].iter().all(|cell| !cell.is_empty())
    }

    /// Checks whether `matrix` placed at `position + delta` is illegal.
    ///
    /// A placement collides when any occupied cell lands below the bottom
    /// row, left of column 0, right of the last column, or on a filled cell.
    /// Cells above row 0 never collide, so pieces may poke out of the top.
    #[must_use]
    pub fn is_colliding(&self, matrix: ShapeMatrix, position: Position, delta: Position) -> bool {
        let origin = position + delta;
        matrix.occupied_cells().any(|(dx, dy)| {
            let (x, y) = origin.offset(dx, dy);
            let Ok(x) = usize::try_from(x) else {
                return true;
            };
            if x >= self.width() {
                return true;
            }
            let Ok(y) = usize::try_from(y) else {
                return false;
            };
            y >= self.height() || !self.is_empty_at(x, y)
        })
    }

    /// Writes `kind` into every occupied cell of `matrix` placed at `position`.
    ///
    /// # Panics
    ///
    /// Panics if any occupied cell is outside the board. Callers check the
    /// placement with [`Self::is_colliding`] first.
    pub fn merge(&mut self, matrix: ShapeMatrix, position: Position, kind: ShapeKind) {
        for (dx, dy) in matrix.occupied_cells() {
            let (x, y) = position.offset(dx, dy);
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                panic!("merging piece out of bounds at ({x}, {y})");
            };
            assert!(
                x < self.width() && y < self.height(),
                "merging piece out of bounds at ({x}, {y})"
            );
            self.rows[y][x] = Cell::Filled(kind);
        }
    }

    /// Removes every full row and returns the number of rows removed.
    ///
    /// Remaining rows keep their relative order and move down; one empty row
    /// is inserted at the top per removed row.
    pub fn sweep_and_compact(&mut self) -> usize {
        let width = self.width();
        let height = self.height();
        let kept: Vec<_> = self
            .rows
            .drain(..)
            .filter(|row| row.iter().any(|cell| cell.is_empty()))
            .collect();
        let removed = height - kept.len();

        let mut rows = Vec::with_capacity(height);
        rows.resize_with(removed, || vec![Cell::Empty; width]);
        rows.extend(kept);
        self.rows = rows;
        removed
    }

    /// Creates a `Board` from ASCII art representation for testing.
    ///
    /// Piece letters (`I`, `J`, ...) are filled cells and `.` is an empty cell.
    /// Rows are aligned to the bottom of the board, so the art may be shorter
    /// than the board height.
    ///
    /// # Panics
    ///
    /// Panics if a row does not have exactly `size.width()` cells, contains an
    /// unknown character, or there are more rows than the board height.
    #[must_use]
    pub fn from_ascii(size: BoardSize, art: &str) -> Self {
        let mut board = Self::new(size);
        let lines: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        assert!(
            lines.len() <= size.height(),
            "expected at most {} rows, got {}",
            size.height(),
            lines.len()
        );

        let top = size.height() - lines.len();
        for (i, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            assert_eq!(
                chars.len(),
                size.width(),
                "Each row must have exactly {} cells, got {} at row {}",
                size.width(),
                chars.len(),
                i
            );
            for (x, ch) in chars.into_iter().enumerate() {
                board.rows[top + i][x] = match ch {
                    '.' => Cell::Empty,
                    _ => Cell::Filled(
                        ShapeKind::from_char(ch)
                            .unwrap_or_else(|| panic!("invalid cell character: {ch:?}")),
                    ),
                };
            }
        }
        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for cell in row {
                let ch = match cell {
                    Cell::Empty => '.',
                    Cell::Filled(kind) => kind.as_char(),
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(width: usize, height: usize) -> BoardSize {
        BoardSize::new(width, height).unwrap()
    }

    #[test]
    fn test_initial_board() {
        let board = Board::new(BoardSize::STANDARD);
        assert_eq!(board.width(), 10);
        assert_eq!(board.height(), 20);
        assert_eq!(board.rows().count(), 20);
        for row in board.rows() {
            assert_eq!(row.len(), 10);
            assert!(row.iter().all(|cell| cell.is_empty()));
        }
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(Board::create(0, 20).is_err());
        assert!(Board::create(10, 0).is_err());
        assert!(Board::create(1, 1).is_ok());
    }

    #[test]
    fn test_set_and_check_cell() {
        let mut board = Board::new(BoardSize::STANDARD);
        assert!(board.is_empty_at(3, 5));
        board.set_cell(3, 5, Cell::Filled(ShapeKind::T));
        assert_eq!(board.cell(3, 5), Cell::Filled(ShapeKind::T));
        assert!(!board.is_empty_at(3, 5));
    }

    #[test]
    fn test_is_row_full() {
        let board = Board::from_ascii(
            size(4, 3),
            "
            IIII
            II.I
            ",
        );
        assert!(!board.is_row_full(0));
        assert!(board.is_row_full(1));
        assert!(!board.is_row_full(2));
    }

    #[test]
    fn test_sweep_single_row() {
        let mut board = Board::from_ascii(
            size(4, 4),
            "
            .T..
            TTTT
            J..L
            ",
        );
        assert_eq!(board.sweep_and_compact(), 1);
        assert_eq!(board.to_string(), "....\n....\n.T..\nJ..L\n");
    }

    #[test]
    fn test_sweep_non_consecutive_rows_keeps_order() {
        let mut board = Board::from_ascii(
            size(3, 6),
            "
            S..
            OOO
            .Z.
            III
            ..L
            ",
        );
        assert_eq!(board.sweep_and_compact(), 2);
        assert_eq!(board.to_string(), "...\n...\n...\nS..\n.Z.\n..L\n");
        assert_eq!(board.height(), 6);
        assert!((0..board.height()).all(|y| !board.is_row_full(y)));
    }

    #[test]
    fn test_sweep_nothing_to_clear() {
        let mut board = Board::from_ascii(
            size(3, 2),
            "
            I.I
            .I.
            ",
        );
        let before = board.clone();
        assert_eq!(board.sweep_and_compact(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_sweep_all_rows() {
        let mut board = Board::from_ascii(
            size(2, 3),
            "
            OO
            OO
            II
            ",
        );
        assert_eq!(board.sweep_and_compact(), 3);
        assert_eq!(board, Board::new(size(2, 3)));
    }

    #[test]
    fn test_collision_with_walls_and_floor() {
        let board = Board::new(size(10, 20));
        let matrix = ShapeKind::O.matrix();
        let zero = Position::new(0, 0);

        assert!(!board.is_colliding(matrix, Position::new(0, 0), zero));
        assert!(!board.is_colliding(matrix, Position::new(8, 18), zero));
        // left wall
        assert!(board.is_colliding(matrix, Position::new(0, 0), Position::new(-1, 0)));
        // right wall
        assert!(board.is_colliding(matrix, Position::new(8, 0), Position::new(1, 0)));
        // floor
        assert!(board.is_colliding(matrix, Position::new(8, 18), Position::new(0, 1)));
    }

    #[test]
    fn test_collision_above_top_is_allowed() {
        let board = Board::new(size(10, 20));
        let matrix = ShapeKind::I.matrix().rotated_right();
        assert!(!board.is_colliding(matrix, Position::new(4, -3), Position::new(0, 0)));
        assert!(!board.is_colliding(matrix, Position::new(4, 0), Position::new(0, -2)));
    }

    #[test]
    fn test_collision_empty_matrix_cells_ignored() {
        let board = Board::new(size(10, 20));
        // L has an empty first column, so x = -1 is legal
        let matrix = ShapeKind::L.matrix();
        assert!(!board.is_colliding(matrix, Position::new(-1, 0), Position::new(0, 0)));
        assert!(board.is_colliding(matrix, Position::new(-2, 0), Position::new(0, 0)));
    }

    #[test]
    fn test_collision_with_filled_cells() {
        let board = Board::from_ascii(
            size(4, 3),
            "
            ....
            ..Z.
            ",
        );
        let matrix = ShapeKind::O.matrix();
        let pos = Position::new(1, 0);
        assert!(!board.is_colliding(matrix, pos, Position::new(0, 0)));
        assert!(board.is_colliding(matrix, pos, Position::new(0, 1)));
        assert!(!board.is_colliding(matrix, pos, Position::new(-1, 1)));
    }

    #[test]
    fn test_merge_writes_kind() {
        let mut board = Board::new(size(4, 4));
        board.merge(ShapeKind::T.matrix(), Position::new(1, 2), ShapeKind::T);
        assert_eq!(board.to_string(), "....\n....\n.TTT\n..T.\n");
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_merge_out_of_bounds_panics() {
        let mut board = Board::new(size(4, 4));
        board.merge(ShapeKind::I.matrix(), Position::new(1, 0), ShapeKind::I);
    }

    #[test]
    fn test_from_ascii_aligns_to_bottom() {
        let board = Board::from_ascii(size(3, 3), "S.Z");
        assert_eq!(board.cell(0, 2), Cell::Filled(ShapeKind::S));
        assert_eq!(board.cell(2, 2), Cell::Filled(ShapeKind::Z));
        assert!(board.rows().take(2).flatten().all(|cell| cell.is_empty()));
    }
}
