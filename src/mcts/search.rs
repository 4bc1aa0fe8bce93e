//! Core MCTS search algorithm.
//!
//! A search is a two-step session: `start` captures the position, the
//! candidate moves and the searching side; `execute` runs
//! select / expand / simulate / backpropagate until the budget is spent and
//! returns the index of the chosen move in the caller's candidate list.
//! The tree lives only for the duration of one session.

use std::time::Instant;

use thiserror::Error;
use tracing::{debug, trace};

use crate::core::{GameRng, Move, PlayerId};
use crate::rules::GameState;

use super::budget::BudgetController;
use super::config::{ConfigError, MCTSConfig};
use super::node::NodeId;
use super::policy::{RandomPlayout, SelectionPolicy, SimulationPolicy, UCT};
use super::prune::group_by_relocation;
use super::stats::{SearchStats, StopReason};
use super::tree::MCTSTree;

/// Errors returned by a search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("invalid search configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("search was not started")]
    NotStarted,

    #[error("no legal moves to choose from")]
    NoLegalMoves,

    #[error("move index {index} out of range for {len} moves")]
    InvalidChoice { index: usize, len: usize },

    #[error("search requested for {got} but {expected} is to move")]
    WrongSide { expected: PlayerId, got: PlayerId },
}

/// State captured by `start` and consumed by `execute`.
struct Session<G> {
    tree: MCTSTree,
    /// Position at the time of `start`. Never mutated.
    actual: G,
    candidates: Vec<Move>,
    searching: PlayerId,
    budget: BudgetController,
    /// Fork of the search RNG used for arrow sampling and playouts.
    rng: GameRng,
}

/// Main MCTS search context.
///
/// Generic over the game type. Owns the configuration, the policies and
/// the RNG; the tree is created by `start` and dropped when `execute`
/// returns.
///
/// ## Example
///
/// ```
/// use amazons_mcts::games::amazons::AmazonsBuilder;
/// use amazons_mcts::mcts::{MCTSConfig, MCTSSearch};
/// use amazons_mcts::rules::GameState;
///
/// let game = AmazonsBuilder::standard().build().unwrap();
/// let player = game.side_to_move();
/// let moves = game.legal_moves(player);
///
/// let config = MCTSConfig::default().with_max_iterations(50).with_seed(7);
/// let mut search = MCTSSearch::new(config);
/// let index = search.search(&game, &moves, player).unwrap();
///
/// assert!(index < moves.len());
/// ```
pub struct MCTSSearch<G: GameState> {
    /// Search configuration.
    config: MCTSConfig,

    /// Parent RNG; every session runs on a fork of it.
    rng: GameRng,

    /// Selection policy.
    selection: Box<dyn SelectionPolicy>,

    /// Simulation policy.
    simulation: Box<dyn SimulationPolicy<G>>,

    /// Session between `start` and the end of `execute`.
    session: Option<Session<G>>,

    /// Statistics of the current or last session.
    stats: SearchStats,
}

impl<G: GameState> MCTSSearch<G> {
    /// Create a new search context.
    ///
    /// The RNG is seeded from `config.seed` when set, otherwise from
    /// entropy.
    pub fn new(config: MCTSConfig) -> Self {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);

        Self {
            config,
            rng,
            selection: Box::new(UCT),
            simulation: Box::new(RandomPlayout),
            session: None,
            stats: SearchStats::default(),
        }
    }

    /// Replace the search RNG.
    pub fn with_rng(mut self, rng: GameRng) -> Self {
        self.rng = rng;
        self
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom simulation policy.
    pub fn with_simulation<S: SimulationPolicy<G> + 'static>(mut self, simulation: S) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    /// Begin a search for `player` over `possible_moves` in `game`.
    ///
    /// The game is cloned; the caller's copy is never touched. Starting
    /// again discards any unfinished session. `player` must be the side to
    /// move in `game`.
    pub fn start(
        &mut self,
        possible_moves: &[Move],
        game: &G,
        player: PlayerId,
    ) -> Result<(), SearchError> {
        self.config.validate()?;
        let expected = game.side_to_move();
        if player != expected {
            return Err(SearchError::WrongSide { expected, got: player });
        }
        self.stats.reset();

        debug!(
            candidates = possible_moves.len(),
            player = %player,
            max_iterations = self.config.budget.max_iterations,
            timeout_secs = self.config.budget.timeout_secs,
            "search started"
        );

        self.session = Some(Session {
            tree: MCTSTree::new(player),
            actual: game.clone(),
            candidates: possible_moves.to_vec(),
            searching: player,
            budget: BudgetController::new(&self.config),
            rng: self.rng.fork(),
        });

        Ok(())
    }

    /// Run the started session to the end of its budget and return the
    /// index of the chosen move in the candidate list given to `start`.
    ///
    /// At least one iteration runs. The session is consumed whether or not
    /// a move is found.
    pub fn execute(&mut self) -> Result<usize, SearchError> {
        let mut session = self.session.take().ok_or(SearchError::NotStarted)?;
        let start = Instant::now();
        session.budget.restart_clock();

        let stop_reason = loop {
            let weight = session.budget.exploration_weight();
            self.iteration(&mut session, weight);

            let root = session.tree.root_node();
            if root.expanded && root.is_leaf() {
                debug!(iterations = session.budget.iterations(), "search found no legal moves");
                return Err(SearchError::NoLegalMoves);
            }

            if let Some(reason) = session.budget.record_iteration() {
                break reason;
            }
        };

        self.finish(session, stop_reason, start)
    }

    /// `start` followed by `execute`.
    pub fn search(
        &mut self,
        game: &G,
        possible_moves: &[Move],
        player: PlayerId,
    ) -> Result<usize, SearchError> {
        self.start(possible_moves, game, player)?;
        self.execute()
    }

    /// Run exactly one iteration on the started session, ignoring the
    /// budget. The tree stays available through `tree()`.
    pub fn step(&mut self) -> Result<(), SearchError> {
        let mut session = self.session.take().ok_or(SearchError::NotStarted)?;
        let weight = session.budget.exploration_weight();
        self.iteration(&mut session, weight);
        session.budget.record_iteration();
        self.session = Some(session);
        Ok(())
    }

    /// The tree of the running session, if any.
    #[must_use]
    pub fn tree(&self) -> Option<&MCTSTree> {
        self.session.as_ref().map(|s| &s.tree)
    }

    /// Whether a session is waiting for `execute`.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.session.is_some()
    }

    /// Get search statistics.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the search configuration.
    #[must_use]
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Single MCTS iteration: select, expand, simulate, backpropagate.
    fn iteration(&mut self, session: &mut Session<G>, weight: f64) {
        let mut game = session.actual.clone();

        let leaf = self.select(&session.tree, &mut game, weight);
        let node = self.expand(session, leaf, &mut game);

        let won = self
            .simulation
            .simulate(&mut game, session.searching, &mut session.rng);
        self.stats.simulations += 1;

        session.tree.backpropagate(node, won);
        self.stats.iterations += 1;
    }

    /// Descend from the root to a node without children, replaying each
    /// selected move on `game`.
    fn select(&self, tree: &MCTSTree, game: &mut G, weight: f64) -> NodeId {
        let mut current = tree.root();

        while let Some(child) = self.selection.select(tree, current, weight) {
            let node = tree.get(child);
            game.apply_move(node.player, &node.mv);
            game.advance_turn();
            current = child;
        }

        current
    }

    /// Expand `leaf` and return the node to simulate from. When children
    /// were created, the first one's move has been applied to `game`.
    fn expand(&mut self, session: &mut Session<G>, leaf: NodeId, game: &mut G) -> NodeId {
        let node = session.tree.get(leaf);
        if node.visits == 0 || node.expanded {
            return leaf;
        }

        let mover = node.player.opponent();
        let generated;
        let moves: &[Move] = if node.is_root() {
            &session.candidates
        } else {
            generated = game.legal_moves(mover);
            &generated
        };

        let tree = &mut session.tree;
        tree.get_mut(leaf).expanded = true;

        if moves.len() > self.config.prune_threshold {
            self.stats.pruned_expansions += 1;

            for bucket in group_by_relocation(moves) {
                match bucket.sample_arrow(&mut session.rng, self.config.arrow_resample_limit) {
                    Some((arrow, source)) => {
                        tree.add_child(leaf, bucket.to_move(arrow), mover, source);
                    }
                    None => {
                        self.stats.discarded_relocations += 1;
                        trace!(
                            from = %bucket.relocation.from,
                            to = %bucket.relocation.to,
                            "relocation discarded: no arrow besides the destination"
                        );
                    }
                }
            }
        } else {
            for (source, mv) in moves.iter().enumerate() {
                tree.add_child(leaf, *mv, mover, source);
            }
        }

        let Some(&first) = tree.children(leaf).first() else {
            return leaf;
        };
        self.stats.nodes_expanded += 1;

        let child = tree.get(first);
        game.apply_move(child.player, &child.mv);
        game.advance_turn();
        first
    }

    fn finish(
        &mut self,
        session: Session<G>,
        stop_reason: StopReason,
        start: Instant,
    ) -> Result<usize, SearchError> {
        let tree = &session.tree;
        let best = tree.best_root_child().ok_or(SearchError::NoLegalMoves)?;
        let chosen = tree.get(best);
        let tree_stats = tree.stats();

        self.stats.root_children = tree_stats.root_children;
        self.stats.node_count = tree_stats.node_count;
        self.stats.max_depth = tree_stats.max_depth;
        self.stats.final_exploration = session.budget.exploration_weight();
        self.stats.stop_reason = Some(stop_reason);
        self.stats.time_us = start.elapsed().as_micros() as u64;

        debug!(
            iterations = self.stats.iterations,
            stop_reason = ?stop_reason,
            chosen = chosen.source_index,
            mv = %chosen.mv,
            reward = chosen.total_reward,
            visits = chosen.visits,
            nodes = tree_stats.node_count,
            expanded = tree_stats.expanded_count,
            branching = tree_stats.branching_factor(),
            iterations_per_sec = self.stats.iterations_per_second(),
            elapsed_ms = self.stats.time_us / 1_000,
            "search finished"
        );

        Ok(chosen.source_index)
    }
}
