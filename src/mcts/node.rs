//! MCTS node structures.
//!
//! Uses arena-based allocation with index references (`NodeId`). Each node
//! owns a materialized board snapshot; since the move history is a
//! persistent vector, the snapshot costs one grid copy.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::policy::win_rate;
use crate::core::{Board, Pos, Stone};

/// Index into the `MctsTree` node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the arena index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// A node in the MCTS tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    /// Parent node (`None` for the root).
    pub parent: Option<NodeId>,

    /// Position after `mv` was played.
    pub board: Board,

    /// The player whose outcome `value` is measured against: the player
    /// who placed `mv`.
    pub color: Stone,

    /// The move that produced this node (`None` for a fresh root).
    pub mv: Option<Pos>,

    /// Total visits to this node.
    pub visits: u32,

    /// Accumulated signed outcome from `color`'s perspective.
    pub value: f64,

    /// Depth in tree (root = 1).
    pub depth: u32,

    /// Whether the widened candidate set has been added.
    pub bigger_expanded: bool,

    /// Child nodes; no two share a move.
    pub children: SmallVec<[NodeId; 8]>,
}

impl Node {
    /// Create a root node for `board`.
    ///
    /// The root's color is the player who made the last move, so its value
    /// reads like any other node's.
    pub fn root(board: Board) -> Self {
        let color = board.current_player().opponent();
        let mv = board.last_move();
        Self::new(None, board, color, mv, 1)
    }

    /// Create a child node for `board`, reached by `mv`.
    pub fn child(parent: NodeId, board: Board, mv: Pos, depth: u32) -> Self {
        let color = board.current_player().opponent();
        Self::new(Some(parent), board, color, Some(mv), depth)
    }

    fn new(
        parent: Option<NodeId>,
        board: Board,
        color: Stone,
        mv: Option<Pos>,
        depth: u32,
    ) -> Self {
        Self {
            parent,
            board,
            color,
            mv,
            visits: 0,
            value: 0.0,
            depth,
            bigger_expanded: false,
            children: SmallVec::new(),
        }
    }

    /// Check if this is the root of its tree.
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Check if the node has been expanded.
    #[inline]
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    /// Estimated win probability for `color`.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        win_rate(self.visits, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id = NodeId::new(5);
        assert_eq!(id.index(), 5);
        assert_eq!(format!("{}", id), "NodeId(5)");
    }

    #[test]
    fn test_root_of_empty_board() {
        let node = Node::root(Board::new());

        assert!(node.is_root());
        assert_eq!(node.depth, 1);
        assert_eq!(node.mv, None);
        assert_eq!(node.color, Stone::White);
        assert_eq!(node.visits, 0);
        assert!(!node.is_expanded());
        assert!(!node.bigger_expanded);
    }

    #[test]
    fn test_child_color_is_mover() {
        let board = Board::from_moves([Pos::new(7, 7)]).unwrap();
        let node = Node::child(NodeId::new(0), board, Pos::new(7, 7), 2);

        assert_eq!(node.color, Stone::Black);
        assert_eq!(node.mv, Some(Pos::new(7, 7)));
        assert_eq!(node.parent, Some(NodeId::new(0)));
        assert_eq!(node.depth, 2);
    }

    #[test]
    fn test_unvisited_win_rate_is_even() {
        let node = Node::root(Board::new());
        assert_eq!(node.win_rate(), 0.5);
    }

    #[test]
    fn test_serialization() {
        let mut node = Node::root(Board::from_moves([Pos::new(3, 3)]).unwrap());
        node.visits = 100;
        node.value = -12.0;

        let json = serde_json::to_string(&node).unwrap();
        let deserialized: Node = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.visits, 100);
        assert_eq!(deserialized.value, -12.0);
        assert_eq!(deserialized.board, node.board);
    }
}
