//! Monte Carlo Tree Search for move selection.
//!
//! ## Overview
//!
//! - **Session-based**: `start` captures a position and a candidate list,
//!   `execute` runs the search and returns an index into that list.
//! - **UCT selection** with an exploration weight that decays as the
//!   deadline approaches.
//! - **Relocation pruning**: wide positions get one child per `(from, to)`
//!   pair with a sampled arrow instead of one child per raw move.
//! - **Random playouts** to the end of the game; rewards are counted from
//!   the searching side's point of view.
//! - **Budgeted** by an iteration cap and a wall-clock timeout.
//!
//! ## Usage
//!
//! ```rust
//! use amazons_mcts::core::{Cell, PlayerId};
//! use amazons_mcts::games::amazons::AmazonsBuilder;
//! use amazons_mcts::mcts::{Difficulty, MCTSConfig, MCTSSearch};
//! use amazons_mcts::rules::GameState;
//!
//! let game = AmazonsBuilder::new()
//!     .size(4, 4)
//!     .amazon(PlayerId::FIRST, Cell::new(0, 0))
//!     .amazon(PlayerId::SECOND, Cell::new(3, 3))
//!     .build()
//!     .unwrap();
//!
//! let player = game.side_to_move();
//! let moves = game.legal_moves(player);
//!
//! let config = MCTSConfig::for_difficulty(Difficulty::Easy)
//!     .with_max_iterations(200)
//!     .with_seed(1);
//! let mut search = MCTSSearch::new(config);
//!
//! let index = search.search(&game, &moves, player).unwrap();
//! println!("best move: {}", moves[index]);
//! ```
//!
//! ## Custom Policies
//!
//! ```rust,ignore
//! use amazons_mcts::mcts::{MCTSSearch, MCTSConfig};
//!
//! let search = MCTSSearch::new(config)
//!     .with_selection(MySelection)
//!     .with_simulation(MyPlayout);
//! ```

pub mod budget;
pub mod config;
pub mod node;
pub mod policy;
pub mod prune;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use budget::BudgetController;
pub use config::{ConfigError, DecayStep, Difficulty, MCTSConfig, SearchBudget};
pub use node::{MCTSNode, NodeId};
pub use policy::{RandomPlayout, SelectionPolicy, SimulationPolicy, UCT};
pub use prune::{group_by_relocation, RelocationBucket};
pub use search::{MCTSSearch, SearchError};
pub use stats::{SearchStats, StopReason};
pub use tree::{MCTSTree, TreeStats};
