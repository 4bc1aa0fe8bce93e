//! Game-state trait for game implementations.
//!
//! A `GameState` is a full, independently mutable snapshot of a game.
//! The search clones it once per iteration and replays moves on the
//! clone, so implementations must have value semantics: a clone shares
//! nothing mutable with its source.

use crate::core::moves::Move;
use crate::core::player::PlayerId;

/// Game-state trait.
///
/// ## Implementation Notes
///
/// - `legal_moves`: Return an empty vec if the side cannot move. The order
///   must be deterministic for a given position.
/// - `apply_move`: Does not change whose turn it is; the caller follows up
///   with `advance_turn`.
/// - The game must always end: every line of play reaches a position where
///   the side to move has no legal moves.
pub trait GameState: Clone {
    /// Enumerate every legal move for `player` in the current position.
    fn legal_moves(&self, player: PlayerId) -> Vec<Move>;

    /// Apply `mv` for `player`, mutating the position.
    fn apply_move(&mut self, player: PlayerId, mv: &Move);

    /// The side whose turn it is.
    fn side_to_move(&self) -> PlayerId;

    /// Hand the turn to the other side.
    fn advance_turn(&mut self);

    // === Convenience Methods ===

    /// The winner, if the game is over.
    ///
    /// The game ends when the side to move has no legal moves; the other
    /// side wins. There are no draws.
    fn winner(&self) -> Option<PlayerId> {
        let to_move = self.side_to_move();
        if self.legal_moves(to_move).is_empty() {
            Some(to_move.opponent())
        } else {
            None
        }
    }

    /// Apply `mv` for the side to move, then advance the turn.
    fn play(&mut self, mv: &Move) {
        let player = self.side_to_move();
        self.apply_move(player, mv);
        self.advance_turn();
    }
}
