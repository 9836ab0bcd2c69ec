//! Arena-based MCTS tree.
//!
//! Nodes live in a flat `Vec<Node>` and refer to each other by `NodeId`.
//! Rerooting compacts the arena so only the kept subtree survives.

use serde::{Deserialize, Serialize};

use super::node::{Node, NodeId};
use crate::core::{Board, Pos};

/// Arena-based MCTS tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MctsTree {
    /// All nodes in the tree.
    nodes: Vec<Node>,

    /// The root node ID (always 0 after construction or rerooting).
    root: NodeId,
}

impl MctsTree {
    /// Create a new tree whose root holds `board`.
    pub fn new(board: Board) -> Self {
        let mut nodes = Vec::with_capacity(1024);
        nodes.push(Node::root(board));
        Self {
            nodes,
            root: NodeId::new(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Allocate a new node, returning its ID.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Allocate `node` and link it under `parent`.
    pub fn add_child(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.alloc(node);
        self.get_mut(parent).children.push(id);
        id
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &Node {
        self.get(self.root)
    }

    /// Get the root node mutably.
    pub fn root_node_mut(&mut self) -> &mut Node {
        self.get_mut(self.root)
    }

    /// Children of `id`, in expansion order.
    #[inline]
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    /// Child of `parent` reached by `mv`, if one exists.
    #[must_use]
    pub fn find_child(&self, parent: NodeId, mv: Pos) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&c| self.get(c).mv == Some(mv))
    }

    /// Replace the whole tree with a single fresh root.
    pub fn reset(&mut self, board: Board) {
        self.nodes.clear();
        self.nodes.push(Node::root(board));
        self.root = NodeId::new(0);
    }

    /// Make `id` the new root, discarding everything outside its subtree.
    ///
    /// The kept nodes retain their statistics. The new root loses its parent
    /// and has depth 1; descendants are renumbered in breadth-first order and
    /// have their depths shifted to match.
    pub fn reroot(&mut self, id: NodeId) {
        let shift = self.get(id).depth.saturating_sub(1);

        let mut order = vec![id];
        let mut cursor = 0;
        while cursor < order.len() {
            let node = &self.nodes[order[cursor].index()];
            order.extend(node.children.iter().copied());
            cursor += 1;
        }

        let mut remap = vec![None; self.nodes.len()];
        for (new_index, old) in order.iter().enumerate() {
            remap[old.index()] = Some(NodeId::new(new_index as u32));
        }

        let mut old_nodes: Vec<Option<Node>> =
            std::mem::take(&mut self.nodes).into_iter().map(Some).collect();
        let mut nodes = Vec::with_capacity(order.len());
        for old in &order {
            let Some(mut node) = old_nodes[old.index()].take() else {
                continue;
            };
            node.parent = node.parent.and_then(|p| remap[p.index()]);
            node.depth = node.depth.saturating_sub(shift);
            for child in node.children.iter_mut() {
                if let Some(new_id) = remap[child.index()] {
                    *child = new_id;
                }
            }
            nodes.push(node);
        }

        if let Some(root) = nodes.first_mut() {
            root.parent = None;
            root.depth = 1;
        }

        self.nodes = nodes;
        self.root = NodeId::new(0);
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        for (_, node) in self.iter() {
            stats.node_count += 1;
            stats.max_depth = stats.max_depth.max(node.depth);
            stats.total_children += node.children.len();
            if node.is_expanded() {
                stats.expanded_count += 1;
            }
            if node.bigger_expanded {
                stats.widened_count += 1;
            }
        }
        stats
    }
}

/// Statistics about the MCTS tree.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Maximum depth present (root = 1).
    pub max_depth: u32,

    /// Nodes with at least one child.
    pub expanded_count: usize,

    /// Nodes that received the widened candidate set.
    pub widened_count: usize,

    /// Total parent-child links.
    pub total_children: usize,
}

impl TreeStats {
    /// Average children per expanded node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.expanded_count == 0 {
            0.0
        } else {
            self.total_children as f64 / self.expanded_count as f64
        }
    }
}
