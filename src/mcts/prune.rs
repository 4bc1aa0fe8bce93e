//! Branching-factor pruning by relocation.
//!
//! A position with many legal moves usually has far fewer distinct
//! relocations: each `(from, to)` pair combines with every square the
//! arrow can reach. Grouping by relocation and sampling one arrow per group
//! keeps one child per relocation instead of one per raw move.

use rustc_hash::FxHashMap;

use crate::core::{Cell, GameRng, Move, Relocation};

/// All raw moves sharing one relocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelocationBucket {
    /// The shared `(from, to)` pair.
    pub relocation: Relocation,

    /// Arrow targets in raw-list order, each with the index of the raw move
    /// it came from.
    pub arrows: Vec<(Cell, usize)>,
}

impl RelocationBucket {
    fn new(relocation: Relocation) -> Self {
        Self {
            relocation,
            arrows: Vec::new(),
        }
    }

    /// The full move for one of this bucket's arrows.
    #[must_use]
    pub fn to_move(&self, arrow: Cell) -> Move {
        Move::new(self.relocation.from, self.relocation.to, arrow)
    }

    /// Sample an arrow uniformly, rejecting the relocation's own
    /// destination. Gives up after `max_draws` draws.
    ///
    /// Returns the arrow and the raw index it came from.
    pub fn sample_arrow(&self, rng: &mut GameRng, max_draws: u32) -> Option<(Cell, usize)> {
        if self.arrows.is_empty() {
            return None;
        }

        for _ in 0..max_draws {
            let (arrow, source) = self.arrows[rng.gen_index(self.arrows.len())];
            if arrow != self.relocation.to {
                return Some((arrow, source));
            }
        }

        None
    }
}

/// Group raw moves by relocation.
///
/// Buckets appear in order of first appearance of their relocation in
/// `moves`; arrows within a bucket keep raw-list order.
#[must_use]
pub fn group_by_relocation(moves: &[Move]) -> Vec<RelocationBucket> {
    let mut buckets: Vec<RelocationBucket> = Vec::new();
    let mut index: FxHashMap<Relocation, usize> = FxHashMap::default();

    for (source, mv) in moves.iter().enumerate() {
        let relocation = mv.relocation();
        let slot = *index.entry(relocation).or_insert_with(|| {
            buckets.push(RelocationBucket::new(relocation));
            buckets.len() - 1
        });
        buckets[slot].arrows.push((mv.arrow, source));
    }

    buckets
}
