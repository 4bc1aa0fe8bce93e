//! MCTS policies for selection and simulation.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: How to choose which child to descend into (UCT)
//! - `SimulationPolicy`: How to play a position out to the end (random)

use crate::core::{GameRng, PlayerId};
use crate::rules::GameState;

use super::node::NodeId;
use super::tree::MCTSTree;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for selecting which child node to descend into.
///
/// Implementations must be deterministic given the tree statistics.
pub trait SelectionPolicy: Send + Sync {
    /// Pick a child of `node`. Returns `None` if it has no children.
    fn select(&self, tree: &MCTSTree, node: NodeId, exploration: f64) -> Option<NodeId>;
}

/// Upper Confidence bound applied to Trees.
///
/// Formula: W(c) + C * sqrt(ln(N) / n(c)), where W(c) is the win rate of
/// the side that played the child's move. Unvisited children are taken
/// immediately, in creation order.
#[derive(Clone, Debug, Default)]
pub struct UCT;

impl UCT {
    /// UCT score of a visited child.
    #[must_use]
    pub fn score(win_rate: f64, parent_visits: u32, child_visits: u32, exploration: f64) -> f64 {
        let ln_parent = f64::from(parent_visits).ln();
        win_rate + exploration * (ln_parent / f64::from(child_visits)).sqrt()
    }
}

impl SelectionPolicy for UCT {
    fn select(&self, tree: &MCTSTree, node: NodeId, exploration: f64) -> Option<NodeId> {
        let parent_visits = tree.get(node).visits;
        let mut best: Option<(NodeId, f64)> = None;

        for &child_id in tree.children(node) {
            let child = tree.get(child_id);
            if child.visits == 0 {
                return Some(child_id);
            }

            let score = Self::score(child.mover_win_rate(), parent_visits, child.visits, exploration);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((child_id, score)),
            }
        }

        best.map(|(id, _)| id)
    }
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Policy for playing a position out to a finished game.
pub trait SimulationPolicy<G: GameState>: Send + Sync {
    /// Play `game` to the end. Returns true iff `searching` won.
    ///
    /// The game is modified during simulation.
    fn simulate(&self, game: &mut G, searching: PlayerId, rng: &mut GameRng) -> bool;
}

/// Uniform random playout.
///
/// Plays uniformly random legal moves until the side to move has none.
/// There is no depth cap: the rules guarantee the game ends.
#[derive(Clone, Debug, Default)]
pub struct RandomPlayout;

impl<G: GameState> SimulationPolicy<G> for RandomPlayout {
    fn simulate(&self, game: &mut G, searching: PlayerId, rng: &mut GameRng) -> bool {
        loop {
            let to_move = game.side_to_move();
            let moves = game.legal_moves(to_move);

            let Some(mv) = rng.choose(&moves) else {
                // The side to move is stuck and loses
                return to_move != searching;
            };

            game.apply_move(to_move, mv);
            game.advance_turn();
        }
    }
}
