//! Playing a full game between two agents.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{MoveRecord, PlayerId, PlayerMap};
use crate::mcts::SearchError;
use crate::rules::GameState;

use super::players::Player;

/// Moves and result of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Every move in play order.
    pub moves: Vec<MoveRecord>,

    /// The side that made the last move.
    pub winner: PlayerId,
}

impl GameRecord {
    /// Number of moves played.
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Moves played by one side.
    pub fn moves_by(&self, player: PlayerId) -> impl Iterator<Item = &MoveRecord> {
        self.moves.iter().filter(move |r| r.player == player)
    }
}

/// Alternate `players` on `game` until the side to move has no legal
/// moves. `game` is left in its final position.
pub fn play_game<G: GameState>(
    game: &mut G,
    players: &mut PlayerMap<Box<dyn Player<G>>>,
) -> Result<GameRecord, SearchError> {
    let mut moves = Vec::new();
    let mut ply = 0u32;

    loop {
        let side = game.side_to_move();
        let legal = game.legal_moves(side);

        if legal.is_empty() {
            let winner = side.opponent();
            info!(
                winner = %winner,
                name = players[winner].name(),
                plies = ply,
                "game over"
            );
            return Ok(GameRecord { moves, winner });
        }

        let player = &mut players[side];
        let index = player.choose_move(game, &legal)?;
        let mv = *legal.get(index).ok_or(SearchError::InvalidChoice {
            index,
            len: legal.len(),
        })?;

        info!(ply, player = %side, name = player.name(), mv = %mv, "move played");

        game.apply_move(side, &mv);
        game.advance_turn();
        moves.push(MoveRecord::new(side, mv, ply));
        ply += 1;
    }
}
