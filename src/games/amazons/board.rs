//! Rectangular board geometry and occupancy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Cell, PlayerId};

/// Largest supported side length; columns are lettered `a` to `z`.
pub const MAX_SIDE: u8 = 26;

/// Queen-line direction vectors (dc, dr), clockwise from north.
pub const DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),   // N
    (1, 1),   // NE
    (1, 0),   // E
    (1, -1),  // SE
    (0, -1),  // S
    (-1, -1), // SW
    (-1, 0),  // W
    (-1, 1),  // NW
];

/// Errors raised while setting up a position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board size {width}x{height} is outside 1..={max}", max = MAX_SIDE)]
    InvalidSize { width: u8, height: u8 },

    #[error("square {0} is off the board")]
    OutOfBounds(Cell),

    #[error("square {0} is already occupied")]
    Occupied(Cell),
}

/// Contents of one square.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    #[default]
    Empty,
    Amazon(PlayerId),
    Arrow,
}

impl Square {
    fn symbol(self) -> char {
        match self {
            Square::Empty => '.',
            Square::Amazon(p) if p == PlayerId::FIRST => 'W',
            Square::Amazon(_) => 'B',
            Square::Arrow => 'x',
        }
    }
}

/// Row-major grid of squares.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    width: u8,
    height: u8,
    squares: Vec<Square>,
}

impl Board {
    /// Create an empty board.
    pub fn new(width: u8, height: u8) -> Result<Self, BoardError> {
        let valid = 1..=MAX_SIDE;
        if !valid.contains(&width) || !valid.contains(&height) {
            return Err(BoardError::InvalidSize { width, height });
        }

        Ok(Self {
            width,
            height,
            squares: vec![Square::Empty; usize::from(width) * usize::from(height)],
        })
    }

    #[must_use]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether `cell` lies on the board.
    #[inline]
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width as i8).contains(&cell.col) && (0..self.height as i8).contains(&cell.row)
    }

    #[inline]
    fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.row as usize * usize::from(self.width) + cell.col as usize)
    }

    /// Contents of `cell`, or `None` off the board.
    #[inline]
    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<Square> {
        self.index(cell).map(|i| self.squares[i])
    }

    /// Whether `cell` is on the board and empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.get(cell) == Some(Square::Empty)
    }

    /// Overwrite `cell`.
    pub fn set(&mut self, cell: Cell, square: Square) -> Result<(), BoardError> {
        let index = self.index(cell).ok_or(BoardError::OutOfBounds(cell))?;
        self.squares[index] = square;
        Ok(())
    }

    /// Place `square` on an empty `cell`.
    pub fn place(&mut self, cell: Cell, square: Square) -> Result<(), BoardError> {
        match self.get(cell) {
            None => Err(BoardError::OutOfBounds(cell)),
            Some(Square::Empty) => self.set(cell, square),
            Some(_) => Err(BoardError::Occupied(cell)),
        }
    }

    /// Number of squares holding `square`.
    #[must_use]
    pub fn count(&self, square: Square) -> usize {
        self.squares.iter().filter(|&&s| s == square).count()
    }

    /// Every square reachable from `from` along a queen line without
    /// crossing an occupied square. `vacated` counts as empty.
    ///
    /// Cells come direction by direction (see [`DIRECTIONS`]), nearest
    /// first.
    pub fn queen_reach(&self, from: Cell, vacated: Option<Cell>, mut visit: impl FnMut(Cell)) {
        for (dc, dr) in DIRECTIONS {
            let mut current = from;

            loop {
                current = current.offset(dc, dr);
                if !(self.is_empty(current) || Some(current) == vacated) {
                    break;
                }
                visit(current);
            }
        }
    }

    /// Whether `to` is reachable from `from` along an open queen line.
    #[must_use]
    pub fn reaches(&self, from: Cell, to: Cell, vacated: Option<Cell>) -> bool {
        let mut found = false;
        self.queen_reach(from, vacated, |cell| found |= cell == to);
        found
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in (0..self.height as i8).rev() {
            write!(f, "{:>2} ", row + 1)?;
            for col in 0..self.width as i8 {
                let square = self.get(Cell::new(col, row)).unwrap_or_default();
                write!(f, " {}", square.symbol())?;
            }
            writeln!(f)?;
        }

        write!(f, "   ")?;
        for col in 0..self.width {
            write!(f, " {}", (b'a' + col) as char)?;
        }
        writeln!(f)
    }
}
