//! Move representation: relocation + arrow.
//!
//! A move relocates one amazon from `from` to `to` along a queen line and
//! then fires an arrow from `to` that lands on `arrow`. The piece-movement
//! half on its own is a [`Relocation`]; many moves share a relocation and
//! differ only in where the arrow lands.

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::player::PlayerId;

/// The piece-movement part of a move, independent of its arrow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relocation {
    pub from: Cell,
    pub to: Cell,
}

/// A complete move.
///
/// ## Example
///
/// ```
/// use amazons_mcts::core::{Cell, Move};
///
/// let a = Move::new(Cell::new(0, 3), Cell::new(0, 5), Cell::new(2, 5));
/// let b = Move::new(Cell::new(0, 3), Cell::new(0, 5), Cell::new(0, 3));
///
/// assert_ne!(a, b);
/// assert!(a.same_relocation(&b));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Square the amazon leaves.
    pub from: Cell,

    /// Square the amazon lands on.
    pub to: Cell,

    /// Square the arrow blocks.
    pub arrow: Cell,
}

impl Move {
    #[must_use]
    pub const fn new(from: Cell, to: Cell, arrow: Cell) -> Self {
        Self { from, to, arrow }
    }

    /// The relocation half of this move.
    #[must_use]
    pub const fn relocation(&self) -> Relocation {
        Relocation {
            from: self.from,
            to: self.to,
        }
    }

    /// Whether both moves relocate the same piece to the same square.
    #[must_use]
    pub fn same_relocation(&self, other: &Move) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}/{}", self.from, self.to, self.arrow)
    }
}

/// A move played in a game, for history and replay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The side that played the move.
    pub player: PlayerId,

    /// The move played.
    pub mv: Move,

    /// 0-based ply number.
    pub ply: u32,
}

impl MoveRecord {
    #[must_use]
    pub fn new(player: PlayerId, mv: Move, ply: u32) -> Self {
        Self { player, mv, ply }
    }
}
