//! Amazons position and rules.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Cell, Move, PlayerId, PlayerMap};
use crate::rules::GameState;

use super::board::{Board, BoardError, Square};

/// Amazon positions of one side. Four in the standard game.
pub type AmazonSet = SmallVec<[Cell; 4]>;

/// A Game of the Amazons position.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amazons {
    board: Board,
    amazons: PlayerMap<AmazonSet>,
    to_move: PlayerId,
    ply: u32,
}

impl Amazons {
    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Squares held by `player`'s amazons, in board order.
    #[must_use]
    pub fn amazons(&self, player: PlayerId) -> &[Cell] {
        &self.amazons[player]
    }

    /// Moves played since the position was built.
    #[must_use]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// Whether `mv` is legal for `player` in this position.
    #[must_use]
    pub fn is_legal(&self, player: PlayerId, mv: &Move) -> bool {
        self.board.get(mv.from) == Some(Square::Amazon(player))
            && self.board.reaches(mv.from, mv.to, None)
            && self.board.reaches(mv.to, mv.arrow, Some(mv.from))
    }

    /// Keep each side's amazons sorted row-major so move generation walks
    /// them in board order.
    fn sort_amazons(set: &mut AmazonSet) {
        set.sort_unstable_by_key(|c| (c.row, c.col));
    }
}

impl GameState for Amazons {
    fn legal_moves(&self, player: PlayerId) -> Vec<Move> {
        let mut moves = Vec::new();

        for &from in &self.amazons[player] {
            self.board.queen_reach(from, None, |to| {
                self.board.queen_reach(to, Some(from), |arrow| {
                    moves.push(Move::new(from, to, arrow));
                });
            });
        }

        moves
    }

    fn apply_move(&mut self, player: PlayerId, mv: &Move) {
        debug_assert!(self.is_legal(player, mv), "illegal move {mv} for {player}");

        let set = &mut self.amazons[player];
        if let Some(slot) = set.iter_mut().find(|c| **c == mv.from) {
            *slot = mv.to;
        }
        Self::sort_amazons(set);

        let cleared = self.board.set(mv.from, Square::Empty);
        let moved = self.board.set(mv.to, Square::Amazon(player));
        let shot = self.board.set(mv.arrow, Square::Arrow);
        debug_assert!(
            cleared.and(moved).and(shot).is_ok(),
            "move {mv} leaves the board"
        );
        self.ply += 1;
    }

    fn side_to_move(&self) -> PlayerId {
        self.to_move
    }

    fn advance_turn(&mut self) {
        self.to_move = self.to_move.opponent();
    }
}

impl std::fmt::Display for Amazons {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.board)?;
        writeln!(f, "{} to move", self.to_move)
    }
}

/// Builder for an Amazons position.
///
/// ## Example
///
/// ```
/// use amazons_mcts::core::{Cell, PlayerId};
/// use amazons_mcts::games::amazons::AmazonsBuilder;
/// use amazons_mcts::rules::GameState;
///
/// let game = AmazonsBuilder::new()
///     .size(3, 1)
///     .amazon(PlayerId::FIRST, Cell::new(0, 0))
///     .arrow(Cell::new(2, 0))
///     .build()
///     .unwrap();
///
/// // Move to b1, arrow back to a1
/// assert_eq!(game.legal_moves(PlayerId::FIRST).len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct AmazonsBuilder {
    width: u8,
    height: u8,
    amazons: Vec<(PlayerId, Cell)>,
    arrows: Vec<Cell>,
    to_move: PlayerId,
}

impl Default for AmazonsBuilder {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            amazons: Vec::new(),
            arrows: Vec::new(),
            to_move: PlayerId::FIRST,
        }
    }
}

impl AmazonsBuilder {
    /// Empty 10x10 board, first player to move.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard 10x10 opening: the first player on a4, d1, g1, j4 and
    /// the second on a7, d10, g10, j7.
    pub fn standard() -> Self {
        let first = [(0, 3), (3, 0), (6, 0), (9, 3)];
        let second = [(0, 6), (3, 9), (6, 9), (9, 6)];

        let builder = first.into_iter().fold(Self::new(), |b, (c, r)| {
            b.amazon(PlayerId::FIRST, Cell::new(c, r))
        });
        second.into_iter().fold(builder, |b, (c, r)| {
            b.amazon(PlayerId::SECOND, Cell::new(c, r))
        })
    }

    pub fn size(mut self, width: u8, height: u8) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn amazon(mut self, player: PlayerId, cell: Cell) -> Self {
        self.amazons.push((player, cell));
        self
    }

    pub fn arrow(mut self, cell: Cell) -> Self {
        self.arrows.push(cell);
        self
    }

    pub fn to_move(mut self, player: PlayerId) -> Self {
        self.to_move = player;
        self
    }

    /// Build the position. Fails on a bad board size or when a piece is
    /// off the board or on an occupied square.
    pub fn build(self) -> Result<Amazons, BoardError> {
        let mut board = Board::new(self.width, self.height)?;
        let mut amazons: PlayerMap<AmazonSet> = PlayerMap::default();

        for (player, cell) in self.amazons {
            board.place(cell, Square::Amazon(player))?;
            amazons[player].push(cell);
        }
        for cell in self.arrows {
            board.place(cell, Square::Arrow)?;
        }
        for player in PlayerId::all() {
            Amazons::sort_amazons(&mut amazons[player]);
        }

        Ok(Amazons {
            board,
            amazons,
            to_move: self.to_move,
            ply: 0,
        })
    }
}
