use std::fmt;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum ShapeKind {
    /// I-piece.
    I = 0,
    /// J-piece.
    J = 1,
    /// L-piece.
    L = 2,
    /// O-piece.
    O = 3,
    /// S-piece.
    S = 4,
    /// T-piece.
    T = 5,
    /// Z-piece.
    Z = 6,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::ALL[rng.random_range(0..ShapeKind::LEN)]
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl ShapeKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds in catalog order.
    pub const ALL: [Self; Self::LEN] = [
        ShapeKind::I,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::Z,
    ];

    /// Returns the canonical (spawn orientation) matrix of this piece kind.
    #[must_use]
    pub const fn matrix(self) -> ShapeMatrix {
        SHAPE_CATALOG[self as usize]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::I.as_char(), 'I');
    /// assert_eq!(ShapeKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            ShapeKind::I => 'I',
            ShapeKind::J => 'J',
            ShapeKind::L => 'L',
            ShapeKind::O => 'O',
            ShapeKind::S => 'S',
            ShapeKind::T => 'T',
            ShapeKind::Z => 'Z',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_char('J'), Some(ShapeKind::J));
    /// assert_eq!(ShapeKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(ShapeKind::I),
            'J' => Some(ShapeKind::J),
            'L' => Some(ShapeKind::L),
            'O' => Some(ShapeKind::O),
            'S' => Some(ShapeKind::S),
            'T' => Some(ShapeKind::T),
            'Z' => Some(ShapeKind::Z),
            _ => None,
        }
    }
}

/// Binary cell matrix of a piece, at most 4×4.
///
/// Cells are packed into a `u16` with a fixed row stride of 4 bits, so the
/// matrix is `Copy` and rotating it yields a new value instead of touching the
/// catalog entry.
///
/// # Example
///
/// ```
/// use blockfall_engine::ShapeKind;
///
/// let matrix = ShapeKind::I.matrix();
/// assert_eq!((matrix.width(), matrix.height()), (4, 1));
///
/// let rotated = matrix.rotated_right();
/// assert_eq!((rotated.width(), rotated.height()), (1, 4));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    width: u8,
    height: u8,
    bits: u16,
}

const STRIDE: usize = 4;

impl ShapeMatrix {
    /// Maximum width and height of a matrix.
    pub const MAX_SIZE: usize = STRIDE;

    /// Builds a matrix from rows of `0`/`1` values.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is larger than 4×4 or empty.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn from_rows<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(W > 0 && W <= STRIDE);
        assert!(H > 0 && H <= STRIDE);
        let mut bits = 0;
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                if rows[y][x] != 0 {
                    bits |= 1 << (y * STRIDE + x);
                }
                x += 1;
            }
            y += 1;
        }
        Self {
            width: W as u8,
            height: H as u8,
            bits,
        }
    }

    #[must_use]
    pub fn width(self) -> usize {
        usize::from(self.width)
    }

    #[must_use]
    pub fn height(self) -> usize {
        usize::from(self.height)
    }

    /// Checks whether the cell at column `x`, row `y` is occupied.
    ///
    /// Coordinates outside the matrix are reported as empty.
    #[must_use]
    pub fn is_occupied(self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height() && self.bits & (1 << (y * STRIDE + x)) != 0
    }

    /// Returns an iterator of occupied `(x, y)` cells in row-major order.
    pub fn occupied_cells(self) -> impl Iterator<Item = (usize, usize)> {
        (0..self.height())
            .flat_map(move |y| (0..self.width()).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.is_occupied(x, y))
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn cell_count(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns the matrix rotated 90° clockwise.
    ///
    /// Computed as a transpose followed by reversing each row, so a `w×h`
    /// matrix becomes `h×w`.
    #[must_use]
    pub fn rotated_right(self) -> Self {
        let (width, height) = (self.height(), self.width());
        let mut bits = 0;
        for y in 0..height {
            for x in 0..width {
                // transposed[y][x] = self[x][y], then row reversal
                if self.is_occupied(y, width - 1 - x) {
                    bits |= 1 << (y * STRIDE + x);
                }
            }
        }
        Self {
            width: self.height,
            height: self.width,
            bits,
        }
    }
}

impl fmt::Debug for ShapeMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = (0..self.height()).map(|y| {
            (0..self.width())
                .map(|x| if self.is_occupied(x, y) { '#' } else { '.' })
                .collect::<String>()
        });
        f.debug_list().entries(rows).finish()
    }
}

const SHAPE_CATALOG: [ShapeMatrix; ShapeKind::LEN] = [
    // I-piece
    ShapeMatrix::from_rows([[1, 1, 1, 1]]),
    // J-piece
    ShapeMatrix::from_rows([[0, 1, 0], [0, 1, 0], [1, 1, 0]]),
    // L-piece
    ShapeMatrix::from_rows([[0, 1, 0], [0, 1, 0], [0, 1, 1]]),
    // O-piece
    ShapeMatrix::from_rows([[1, 1], [1, 1]]),
    // S-piece
    ShapeMatrix::from_rows([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
    // T-piece
    ShapeMatrix::from_rows([[1, 1, 1], [0, 1, 0], [0, 0, 0]]),
    // Z-piece
    ShapeMatrix::from_rows([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
];
