//! MCTS node structure.
//!
//! Nodes live in the `MCTSTree` arena and refer to each other by `NodeId`.
//! A node owns its children only through the arena; the parent link is a
//! plain index used for upward walks.

use crate::core::{Move, PlayerId};

/// Index into the MCTSTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// A node in the MCTS tree.
#[derive(Clone, Debug)]
pub struct MCTSNode {
    /// Parent node (`None` for root).
    pub parent: Option<NodeId>,

    /// Child nodes in creation order. Empty until the node is expanded.
    pub children: Vec<NodeId>,

    /// Whether expansion already ran here. A node is expanded at most once
    /// per search, even when expansion produced no children.
    pub expanded: bool,

    /// Move that leads from the parent's position to this one.
    /// Placeholder for the root.
    pub mv: Move,

    /// Side that played `mv`.
    pub player: PlayerId,

    /// Whether `player` is the searching side.
    pub is_self_move: bool,

    /// Backpropagation passes that included this node.
    pub visits: u32,

    /// Playouts through this node won by the searching side.
    pub total_reward: u32,

    /// Depth in tree (root = 0).
    pub depth: u16,

    /// Index of `mv` in the move list this node was expanded from.
    /// For root children that is the caller's candidate list.
    pub source_index: usize,
}

impl MCTSNode {
    /// Create a root node for a search run by `searching`.
    ///
    /// The root stands for the opponent's last move, so its children are
    /// the searching side's candidates. It starts with one visit so the
    /// UCT term of its children never takes `ln(0)`.
    pub fn root(searching: PlayerId) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            expanded: false,
            mv: Move::default(),
            player: searching.opponent(),
            is_self_move: false,
            visits: 1,
            total_reward: 0,
            depth: 0,
            source_index: 0,
        }
    }

    /// Create an unvisited child node.
    pub fn new(
        parent: NodeId,
        mv: Move,
        player: PlayerId,
        searching: PlayerId,
        depth: u16,
        source_index: usize,
    ) -> Self {
        Self {
            parent: Some(parent),
            children: Vec::new(),
            expanded: false,
            mv,
            player,
            is_self_move: player == searching,
            visits: 0,
            total_reward: 0,
            depth,
            source_index,
        }
    }

    /// Check if this is the root node.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Check if this node has not been expanded yet.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Fraction of playouts through this node won by the searching side.
    /// Zero for an unvisited node.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            f64::from(self.total_reward) / f64::from(self.visits)
        }
    }

    /// Win rate from the point of view of the side that played `mv`.
    #[must_use]
    pub fn mover_win_rate(&self) -> f64 {
        if self.is_self_move {
            self.win_rate()
        } else {
            1.0 - self.win_rate()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Cell;

    fn sample_move() -> Move {
        Move::new(Cell::new(0, 0), Cell::new(0, 2), Cell::new(1, 2))
    }

    #[test]
    fn test_node_id() {
        let id = NodeId::new(5);
        assert_eq!(id.raw(), 5);
        assert_eq!(id.index(), 5);
        assert_eq!(format!("{}", id), "NodeId(5)");
    }

    #[test]
    fn test_node_root() {
        let node = MCTSNode::root(PlayerId::FIRST);

        assert!(node.is_root());
        assert!(node.is_leaf());
        assert!(!node.expanded);
        assert_eq!(node.player, PlayerId::SECOND);
        assert!(!node.is_self_move);
        assert_eq!(node.visits, 1);
        assert_eq!(node.total_reward, 0);
        assert_eq!(node.depth, 0);
    }

    #[test]
    fn test_child_node() {
        let own = MCTSNode::new(NodeId::new(0), sample_move(), PlayerId::FIRST, PlayerId::FIRST, 1, 3);
        let theirs = MCTSNode::new(NodeId::new(1), sample_move(), PlayerId::SECOND, PlayerId::FIRST, 2, 0);

        assert_eq!(own.parent, Some(NodeId::new(0)));
        assert!(own.is_self_move);
        assert!(!theirs.is_self_move);
        assert_eq!(own.visits, 0);
        assert_eq!(own.source_index, 3);
    }

    #[test]
    fn test_win_rates() {
        let mut own = MCTSNode::new(NodeId::new(0), sample_move(), PlayerId::FIRST, PlayerId::FIRST, 1, 0);
        assert_eq!(own.win_rate(), 0.0);

        own.visits = 4;
        own.total_reward = 3;
        assert_eq!(own.win_rate(), 0.75);
        assert_eq!(own.mover_win_rate(), 0.75);

        let mut theirs = own.clone();
        theirs.is_self_move = false;
        assert_eq!(theirs.mover_win_rate(), 0.25);
    }
}
