//! # amazons-mcts
//!
//! Monte Carlo Tree Search move selection for the Game of the Amazons.
//!
//! ## Design Principles
//!
//! 1. **Game-agnostic search**: The search only sees the `GameState` trait.
//!    Amazons is one implementation of it.
//!
//! 2. **Caller-relative answers**: A search is handed a position and a list
//!    of candidate moves, and answers with an index into that list.
//!
//! 3. **Bounded work**: Every search stops on an iteration cap or a
//!    wall-clock timeout, whichever comes first.
//!
//! ## Architecture
//!
//! - **Arena tree**: Nodes live in one `Vec` and link by index; a search's
//!   tree is dropped in one go when the search returns.
//!
//! - **Relocation pruning**: Positions with hundreds of legal moves are
//!   expanded one child per amazon relocation, each with a sampled arrow.
//!
//! - **Injectable randomness**: All sampling goes through a seedable
//!   `GameRng`, so searches are reproducible under a fixed seed.
//!
//! ## Modules
//!
//! - `core`: Sides, cells, moves, RNG
//! - `rules`: `GameState` trait for game implementations
//! - `mcts`: Monte Carlo Tree Search
//! - `games`: Game of the Amazons
//! - `agents`: Players and the game loop

pub mod core;
pub mod rules;
pub mod mcts;
pub mod games;
pub mod agents;

// Re-export commonly used types
pub use crate::core::{Cell, GameRng, Move, MoveRecord, PlayerId, PlayerMap, Relocation};

pub use crate::rules::GameState;

pub use crate::mcts::{
    ConfigError, DecayStep, Difficulty, MCTSConfig, MCTSNode, MCTSSearch, MCTSTree, NodeId,
    RandomPlayout, SearchBudget, SearchError, SearchStats, SelectionPolicy, SimulationPolicy,
    StopReason, TreeStats, UCT,
};

pub use crate::games::amazons::{Amazons, AmazonsBuilder, BoardError};

pub use crate::agents::{play_game, GameRecord, MctsPlayer, Player, RandomPlayer};
