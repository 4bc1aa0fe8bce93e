//! Board coordinates.

use serde::{Deserialize, Serialize};

/// A board square addressed by column and row, both 0-based.
///
/// Displayed in algebraic notation: column letter then 1-based row,
/// so `Cell::new(0, 0)` is `a1` and `Cell::new(9, 9)` is `j10`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: i8,
    pub row: i8,
}

impl Cell {
    #[must_use]
    pub const fn new(col: i8, row: i8) -> Self {
        Self { col, row }
    }

    /// The neighbouring cell one step in direction `(dc, dr)`.
    ///
    /// May lie off the board; callers bound-check against their board.
    #[inline]
    #[must_use]
    pub const fn offset(self, dc: i8, dr: i8) -> Self {
        Self {
            col: self.col + dc,
            row: self.row + dr,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if (0..26).contains(&self.col) {
            write!(f, "{}{}", (b'a' + self.col as u8) as char, self.row as i32 + 1)
        } else {
            write!(f, "({},{})", self.col, self.row)
        }
    }
}
