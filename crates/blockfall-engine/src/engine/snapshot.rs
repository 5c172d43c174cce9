use serde::Serialize;

use crate::{ActivePiece, Board, Cell, GameProgress, ShapeKind};

use super::session::SessionState;

/// What a renderer should draw in one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum DisplayCell {
    #[default]
    Empty,
    /// Landing preview of the active piece.
    Ghost(ShapeKind),
    /// Locked block or a cell of the active piece.
    Piece(ShapeKind),
}

impl From<Cell> for DisplayCell {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => DisplayCell::Empty,
            Cell::Filled(kind) => DisplayCell::Piece(kind),
        }
    }
}

/// Read-only view of a session, produced after every mutation.
///
/// The active piece (and optionally its landing ghost) is already overlaid
/// onto `cells`, so renderers never need to touch engine types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub cells: Vec<Vec<DisplayCell>>,
    pub progress: GameProgress,
    pub next: ShapeKind,
    pub state: SessionState,
    pub final_score: Option<usize>,
    pub leaderboard_revision: u64,
}

impl Snapshot {
    #[must_use]
    pub fn width(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Renders the cells as text, one line per row.
    ///
    /// Blocks use the piece letter, ghost cells `+` and empty cells `.`.
    #[must_use]
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.height() * (self.width() + 1));
        for row in &self.cells {
            out.extend(row.iter().map(|cell| match cell {
                DisplayCell::Empty => '.',
                DisplayCell::Ghost(_) => '+',
                DisplayCell::Piece(kind) => kind.as_char(),
            }));
            out.push('\n');
        }
        out
    }
}

/// Copies the board and overlays the active piece and its ghost.
pub(crate) fn compose_cells(
    board: &Board,
    active: Option<&ActivePiece>,
    show_ghost: bool,
) -> Vec<Vec<DisplayCell>> {
    let mut cells: Vec<Vec<DisplayCell>> = board
        .rows()
        .map(|row| row.iter().copied().map(DisplayCell::from).collect())
        .collect();

    let Some(piece) = active else {
        return cells;
    };

    let mut paint = |x: i32, y: i32, cell: DisplayCell| {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        if let Some(slot) = cells.get_mut(y).and_then(|row| row.get_mut(x))
            && (cell.is_piece() || slot.is_empty())
        {
            *slot = cell;
        }
    };

    if show_ghost {
        let landing = piece.drop_position(board);
        for (dx, dy) in piece.matrix().occupied_cells() {
            let (x, y) = landing.offset(dx, dy);
            paint(x, y, DisplayCell::Ghost(piece.kind()));
        }
    }
    for (x, y) in piece.occupied_cells() {
        paint(x, y, DisplayCell::Piece(piece.kind()));
    }
    cells
}

#[cfg(test)]
mod tests {
    use crate::{BoardSize, Position};

    use super::*;

    #[test]
    fn test_compose_overlays_piece_and_ghost() {
        let board = Board::from_ascii(
            BoardSize::new(4, 5).unwrap(),
            "
            Z...
            ZZ..
            ",
        );
        let piece = ActivePiece::spawn(ShapeKind::O, &board).unwrap();
        let cells = compose_cells(&board, Some(&piece), true);
        let snapshot = Snapshot {
            cells,
            progress: GameProgress::new(),
            next: ShapeKind::T,
            state: SessionState::Falling,
            final_score: None,
            leaderboard_revision: 0,
        };
        assert_eq!(snapshot.to_ascii(), ".OO.\n.OO.\n.++.\nZ++.\nZZ..\n");
        assert_eq!(snapshot.width(), 4);
        assert_eq!(snapshot.height(), 5);
    }

    #[test]
    fn test_compose_without_ghost() {
        let board = Board::new(BoardSize::new(4, 4).unwrap());
        let piece = ActivePiece::spawn(ShapeKind::O, &board).unwrap();
        let cells = compose_cells(&board, Some(&piece), false);
        assert!(cells.iter().flatten().all(|cell| !cell.is_ghost()));
        assert_eq!(cells[0][1], DisplayCell::Piece(ShapeKind::O));
    }

    #[test]
    fn test_compose_skips_cells_above_board() {
        let board = Board::new(BoardSize::new(4, 4).unwrap());
        let mut piece = ActivePiece::spawn(ShapeKind::I, &board).unwrap();
        piece.try_rotate(&board).unwrap();
        assert_eq!(piece.position(), Position::new(0, 0));
        // moving up is legal above the board
        piece.try_translate(&board, 0, -2).unwrap();
        let cells = compose_cells(&board, Some(&piece), false);
        let filled: Vec<_> = (0..4).filter(|&y| cells[y][0].is_piece()).collect();
        assert_eq!(filled, vec![0, 1]);
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let board = Board::from_ascii(BoardSize::new(2, 1).unwrap(), "J.");
        let snapshot = Snapshot {
            cells: compose_cells(&board, None, true),
            progress: GameProgress::new(),
            next: ShapeKind::S,
            state: SessionState::GameOver,
            final_score: Some(0),
            leaderboard_revision: 3,
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["cells"], serde_json::json!([[{"piece": "J"}, "empty"]]));
        assert_eq!(json["next"], "S");
        assert_eq!(json["state"], "game_over");
        assert_eq!(json["final_score"], 0);
        assert_eq!(json["progress"]["score"], 0);
    }
}
