//! MCTS search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Why the iteration loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The iteration cap was reached.
    IterationCap,
    /// The wall-clock timeout was exceeded.
    Timeout,
}

/// Statistics collected during one search call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Total iterations performed.
    pub iterations: u32,

    /// Nodes that received children.
    pub nodes_expanded: u32,

    /// Expansions that grouped moves by relocation.
    pub pruned_expansions: u32,

    /// Relocations dropped because no arrow other than the destination
    /// could be sampled.
    pub discarded_relocations: u32,

    /// Simulations (rollouts) performed.
    pub simulations: u32,

    /// Candidate moves kept at the root.
    pub root_children: usize,

    /// Total nodes in the tree when the search ended.
    pub node_count: usize,

    /// Maximum depth reached during search.
    pub max_depth: u16,

    /// Exploration weight in effect when the search ended.
    pub final_exploration: f64,

    /// Why the search ended (`None` until `execute` finishes).
    pub stop_reason: Option<StopReason>,

    /// Total time spent in `execute` (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Calculate iterations per second.
    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.iterations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}
