//! Move-choosing agents.

use crate::core::{GameRng, Move};
use crate::mcts::{MCTSConfig, MCTSSearch, SearchError, SearchStats};
use crate::rules::GameState;

/// Something that picks a move from a list.
pub trait Player<G: GameState> {
    /// Display name used in logs.
    fn name(&self) -> &str;

    /// Pick one of `moves` for the side to move in `game`. Returns the
    /// index of the chosen move.
    fn choose_move(&mut self, game: &G, moves: &[Move]) -> Result<usize, SearchError>;
}

/// Player backed by an MCTS search.
pub struct MctsPlayer<G: GameState> {
    name: String,
    search: MCTSSearch<G>,
}

impl<G: GameState> MctsPlayer<G> {
    pub fn new(config: MCTSConfig) -> Self {
        Self::from_search(MCTSSearch::new(config))
    }

    /// Wrap an already configured search.
    pub fn from_search(search: MCTSSearch<G>) -> Self {
        Self {
            name: "mcts".to_string(),
            search,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Statistics of the last move choice.
    #[must_use]
    pub fn last_stats(&self) -> &SearchStats {
        self.search.stats()
    }
}

impl<G: GameState> Player<G> for MctsPlayer<G> {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, game: &G, moves: &[Move]) -> Result<usize, SearchError> {
        self.search.search(game, moves, game.side_to_move())
    }
}

/// Player that picks uniformly at random.
#[derive(Clone, Debug)]
pub struct RandomPlayer {
    rng: GameRng,
}

impl RandomPlayer {
    pub fn new(seed: u64) -> Self {
        Self::with_rng(GameRng::new(seed))
    }

    pub fn with_rng(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl<G: GameState> Player<G> for RandomPlayer {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, _game: &G, moves: &[Move]) -> Result<usize, SearchError> {
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        Ok(self.rng.gen_index(moves.len()))
    }
}
