//! Arena-based MCTS tree.
//!
//! Uses a flat `Vec<MCTSNode>` with index-based references. The arena owns
//! every node, so dropping the tree frees the whole search in one pass with
//! no recursion.

use super::node::{MCTSNode, NodeId};
use crate::core::{Move, PlayerId};

/// Arena-based MCTS tree for one search call.
#[derive(Clone, Debug)]
pub struct MCTSTree {
    /// All nodes in the tree.
    nodes: Vec<MCTSNode>,

    /// The side the search is choosing a move for.
    searching: PlayerId,
}

impl MCTSTree {
    /// Create a new tree with a root node for a search run by `searching`.
    pub fn new(searching: PlayerId) -> Self {
        Self::with_capacity(searching, 1024)
    }

    /// Create a tree with custom initial capacity.
    pub fn with_capacity(searching: PlayerId, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(MCTSNode::root(searching));
        Self { nodes, searching }
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    /// The side this tree searches for.
    #[must_use]
    pub fn searching(&self) -> PlayerId {
        self.searching
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &MCTSNode {
        &self.nodes[id.index()]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MCTSNode {
        &mut self.nodes[id.index()]
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &MCTSNode {
        self.get(self.root())
    }

    /// Children of a node in creation order.
    #[inline]
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty. Never true: the root always exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a child of `parent` for `mv` played by `player`, appending
    /// it to the parent's children.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        mv: Move,
        player: PlayerId,
        source_index: usize,
    ) -> NodeId {
        let depth = self.get(parent).depth.saturating_add(1);
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(MCTSNode::new(
            parent,
            mv,
            player,
            self.searching,
            depth,
            source_index,
        ));
        self.get_mut(parent).children.push(id);
        id
    }

    /// Walk from `leaf` to the root, adding one visit to every node and one
    /// reward when the searching side won the playout.
    pub fn backpropagate(&mut self, leaf: NodeId, searching_won: bool) {
        let mut current = Some(leaf);

        while let Some(id) = current {
            let node = self.get_mut(id);
            node.visits += 1;
            if searching_won {
                node.total_reward += 1;
            }
            current = node.parent;
        }
    }

    /// Root child with the strictly greatest total reward; the first one
    /// found wins ties.
    #[must_use]
    pub fn best_root_child(&self) -> Option<NodeId> {
        let mut best: Option<(NodeId, u32)> = None;

        for &child in self.children(self.root()) {
            let reward = self.get(child).total_reward;
            match best {
                Some((_, best_reward)) if reward <= best_reward => {}
                _ => best = Some((child, reward)),
            }
        }

        best.map(|(id, _)| id)
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MCTSNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let max_depth = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        let expanded_count = self.nodes.iter().filter(|n| !n.is_leaf()).count();

        TreeStats {
            node_count: self.nodes.len(),
            max_depth,
            expanded_count,
            root_children: self.root_node().children.len(),
        }
    }
}

/// Statistics about the MCTS tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Maximum depth reached.
    pub max_depth: u16,

    /// Number of nodes with children.
    pub expanded_count: usize,

    /// Number of candidate moves kept at the root.
    pub root_children: usize,
}

impl TreeStats {
    /// Average children per expanded node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.expanded_count == 0 {
            0.0
        } else {
            (self.node_count - 1) as f64 / self.expanded_count as f64
        }
    }
}
