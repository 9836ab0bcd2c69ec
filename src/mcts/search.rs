//! Core MCTS search algorithm.
//!
//! One iteration runs selection (with one-time widening near the root),
//! a terminal check, expansion from the key locations, a heuristic rollout,
//! and backpropagation with the sign flipped at every ply.

use std::time::Instant;

use log::{debug, trace, warn};

use super::config::SearchConfig;
use super::node::{Node, NodeId};
use super::policy::{outcome_value, rollout, ucb};
use super::stats::SearchStats;
use super::stream::{CancelToken, ChildSummary, RootSnapshot, SearchStream};
use super::tree::MctsTree;
use crate::core::{Board, BoardError, Pos, SearchRng};
use crate::locations::get_key_locations;

/// Main MCTS search context.
///
/// Owns the search tree, its configuration and the rollout RNG. The tree
/// survives between searches; [`Mcts::select_best_child`] and
/// [`Mcts::update_root`] move the root forward as moves are played.
#[derive(Clone, Debug)]
pub struct Mcts {
    /// The search tree.
    tree: MctsTree,

    /// Search configuration.
    config: SearchConfig,

    /// RNG for rollouts; forked once per rollout.
    rng: SearchRng,

    /// Statistics of the last search call.
    stats: SearchStats,
}

impl Mcts {
    /// Create a search rooted at `board` with the default configuration.
    pub fn new(board: Board) -> Self {
        Self::with_config(board, SearchConfig::default())
    }

    /// Create a search rooted at `board`.
    pub fn with_config(board: Board, config: SearchConfig) -> Self {
        Self {
            tree: MctsTree::new(board),
            rng: SearchRng::new(config.seed),
            config,
            stats: SearchStats::default(),
        }
    }

    /// Get the search configuration.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Get the root node.
    #[must_use]
    pub fn root(&self) -> &Node {
        self.tree.root_node()
    }

    /// Position at the root.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.tree.root_node().board
    }

    /// Get the search tree.
    #[must_use]
    pub fn tree(&self) -> &MctsTree {
        &self.tree
    }

    /// Get statistics of the last search call.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Current root statistics and its children.
    #[must_use]
    pub fn snapshot(&self) -> RootSnapshot {
        let root = self.tree.root_node();
        RootSnapshot {
            visits: root.visits,
            value: root.value,
            children: root
                .children
                .iter()
                .filter_map(|&c| ChildSummary::from_node(self.tree.get(c)))
                .collect(),
        }
    }

    /// Run iterations until one root child has gained `visit_budget` visits
    /// beyond the best child's count at the start.
    ///
    /// Returns at once if the root position is already decided.
    pub fn search(&mut self) {
        let start = Instant::now();
        self.begin_search();

        if !self.board().is_game_over() {
            let target = self.max_child_visits().saturating_add(self.config.visit_budget);
            while self.max_child_visits() <= target {
                self.iteration();
                if !self.root().is_expanded() {
                    break;
                }
            }
        }

        self.finish_search(start);
    }

    /// Run iterations lazily until `cancel` fires; see [`SearchStream`].
    pub fn search_stream(&mut self, cancel: CancelToken) -> SearchStream<'_> {
        SearchStream::new(self, cancel)
    }

    /// Promote the root child with the highest win rate to root.
    ///
    /// Sibling subtrees are discarded. Returns `None` if the root has no
    /// children.
    pub fn select_best_child(&mut self) -> Option<ChildSummary> {
        let root = self.tree.root();
        let mut best: Option<(NodeId, f64)> = None;
        for &child in self.tree.children(root) {
            let rate = self.tree.get(child).win_rate();
            if best.map_or(true, |(_, b)| rate > b) {
                best = Some((child, rate));
            }
        }

        let (best, _) = best?;
        let summary = ChildSummary::from_node(self.tree.get(best));
        self.tree.reroot(best);
        debug!("selected {:?}, {} nodes kept", summary, self.tree.len());
        summary
    }

    /// Advance the root by `mv`.
    ///
    /// An explored child keeps its statistics and subtree; otherwise the
    /// tree restarts from a fresh root.
    pub fn update_root(&mut self, mv: Pos) -> Result<(), BoardError> {
        let root = self.tree.root();
        if let Some(child) = self.tree.find_child(root, mv) {
            self.tree.reroot(child);
            debug!("reused subtree for {}, {} nodes kept", mv, self.tree.len());
            return Ok(());
        }

        let board = self.board().with_move(mv)?;
        self.tree.reset(board);
        debug!("no subtree for {}, starting fresh", mv);
        Ok(())
    }

    /// Run a single select, expand, rollout, backpropagate pass.
    pub fn iteration(&mut self) {
        self.stats.iterations += 1;
        let mut current = self.tree.root();

        // Selection
        while self.tree.get(current).is_expanded() {
            self.widen(current);
            let Some(child) = self.select_child(current) else {
                break;
            };
            let depth = self.tree.get(current).depth + 1;
            self.tree.get_mut(child).depth = depth;
            self.stats.max_depth = self.stats.max_depth.max(depth);
            current = child;
        }

        let outcome = self.tree.get(current).board.outcome();
        let value = if outcome.is_some() {
            self.stats.terminal_hits += 1;
            outcome_value(outcome, self.tree.get(current).color)
        } else {
            let node = self.tree.get(current);
            if node.visits != 0 || node.is_root() {
                if let Some(first) = self.expand(current) {
                    current = first;
                }
            }

            let mut rng = self.rng.fork();
            let node = self.tree.get(current);
            self.stats.rollouts += 1;
            rollout(
                &node.board,
                node.color,
                self.config.expand_bias,
                self.config.rollout_depth,
                &mut rng,
            )
        };

        self.backpropagate(current, value);
    }

    pub(super) fn begin_search(&mut self) {
        self.stats.reset();
    }

    pub(super) fn finish_search(&mut self, start: Instant) {
        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            "search finished: {} iterations, {} nodes, {} us",
            self.stats.iterations,
            self.tree.len(),
            self.stats.time_us
        );
    }

    fn max_child_visits(&self) -> u32 {
        let root = self.tree.root();
        self.tree
            .children(root)
            .iter()
            .map(|&c| self.tree.get(c).visits)
            .max()
            .unwrap_or(0)
    }

    /// Child of `id` with the highest UCB score (first on ties).
    fn select_child(&self, id: NodeId) -> Option<NodeId> {
        let parent_visits = self.tree.get(id).visits;
        let mut best: Option<(NodeId, f64)> = None;
        for &child in self.tree.children(id) {
            let score = ucb(parent_visits, self.tree.get(child));
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((child, score));
            }
        }
        best.map(|(child, _)| child)
    }

    /// Add the key locations of `id` as children, skipping moves already
    /// present. Returns the number of children added.
    fn add_children(&mut self, id: NodeId, moves: Vec<Pos>) -> usize {
        let parent = self.tree.get(id);
        let board = parent.board.clone();
        let depth = parent.depth + 1;

        let mut added = 0;
        for mv in moves {
            if self.tree.find_child(id, mv).is_some() {
                continue;
            }
            debug_assert!(board.is_legal_move(mv), "key location {mv} is occupied");
            let next = match board.with_move(mv) {
                Ok(next) => next,
                Err(err) => {
                    warn!("skipping candidate: {err}");
                    continue;
                }
            };
            self.tree.add_child(id, Node::child(id, next, mv, depth));
            added += 1;
        }
        self.stats.nodes_expanded += added as u32;
        added
    }

    /// Expand a leaf and return its first child.
    fn expand(&mut self, id: NodeId) -> Option<NodeId> {
        let moves = get_key_locations(&self.tree.get(id).board, self.config.expand_bias);
        self.add_children(id, moves);
        self.tree.children(id).first().copied()
    }

    /// One-time widening of a shallow node in a developed position.
    fn widen(&mut self, id: NodeId) {
        let node = self.tree.get(id);
        if node.bigger_expanded
            || node.depth > self.config.widen_max_depth
            || node.board.stone_count() < self.config.widen_min_moves
        {
            return;
        }

        let moves = get_key_locations(&node.board, self.config.widen_bias);
        let added = self.add_children(id, moves);
        self.tree.get_mut(id).bigger_expanded = true;
        self.stats.widenings += 1;
        trace!("widened {} at depth {}: {} new children", id, self.tree.get(id).depth, added);
    }

    /// Walk from `id` to the root, flipping the sign at each ply.
    ///
    /// The root itself only counts the visit.
    fn backpropagate(&mut self, mut id: NodeId, mut value: f64) {
        while let Some(parent) = self.tree.get(id).parent {
            let node = self.tree.get_mut(id);
            node.visits += 1;
            node.value += value;
            id = parent;
            value = -value;
        }
        self.tree.root_node_mut().visits += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Stone;

    fn small_config() -> SearchConfig {
        SearchConfig::default().with_visit_budget(20).with_seed(7)
    }

    #[test]
    fn test_first_iteration_expands_root() {
        let mut mcts = Mcts::new(Board::new());
        mcts.iteration();

        let root = mcts.root();
        assert_eq!(root.visits, 1);
        assert_eq!(root.children.len(), 1);
        let child = mcts.tree().get(root.children[0]);
        assert_eq!(child.mv, Some(Pos::center()));
        assert_eq!(child.visits, 1);
        assert_eq!(child.color, Stone::Black);
    }

    #[test]
    fn test_root_value_is_never_updated() {
        let mut mcts = Mcts::with_config(Board::new(), small_config());
        for _ in 0..30 {
            mcts.iteration();
        }
        assert_eq!(mcts.root().visits, 30);
        assert_eq!(mcts.root().value, 0.0);
    }

    #[test]
    fn test_child_visits_sum_to_root_visits() {
        let board = Board::from_moves([Pos::new(7, 7), Pos::new(8, 8)]).unwrap();
        let mut mcts = Mcts::with_config(board, small_config());
        for _ in 0..50 {
            mcts.iteration();
        }
        let root = mcts.root();
        let total: u32 = root.children.iter().map(|&c| mcts.tree().get(c).visits).sum();
        assert_eq!(total, root.visits);
    }

    #[test]
    fn test_search_reaches_budget() {
        let board = Board::from_moves([Pos::new(7, 7), Pos::new(8, 8)]).unwrap();
        let mut mcts = Mcts::with_config(board, small_config());
        mcts.search();

        let best = mcts.snapshot().children.iter().map(|c| c.visits).max().unwrap();
        assert_eq!(best, 21);
        assert_eq!(mcts.stats().iterations, mcts.root().visits);
    }

    #[test]
    fn test_search_on_decided_board_is_noop() {
        let board = Board::from_moves([
            Pos::new(0, 0),
            Pos::new(5, 5),
            Pos::new(0, 1),
            Pos::new(5, 7),
            Pos::new(0, 2),
            Pos::new(5, 9),
            Pos::new(0, 3),
            Pos::new(5, 11),
            Pos::new(0, 4),
        ])
        .unwrap();
        let mut mcts = Mcts::with_config(board, small_config());
        mcts.search();
        assert_eq!(mcts.root().visits, 0);
        assert_eq!(mcts.stats().iterations, 0);
    }

    #[test]
    fn test_widening_applies_once_in_developed_position() {
        let board = Board::from_moves([
            Pos::new(7, 7),
            Pos::new(7, 8),
            Pos::new(8, 7),
            Pos::new(8, 8),
            Pos::new(6, 6),
            Pos::new(6, 9),
            Pos::new(9, 6),
            Pos::new(9, 9),
        ])
        .unwrap();
        let mut mcts = Mcts::with_config(board, small_config());
        for _ in 0..10 {
            mcts.iteration();
        }
        assert!(mcts.root().bigger_expanded);
        assert!(mcts.stats().widenings >= 1);

        let mut moves: Vec<_> = mcts
            .root()
            .children
            .iter()
            .filter_map(|&c| mcts.tree().get(c).mv)
            .collect();
        let count = moves.len();
        moves.sort();
        moves.dedup();
        assert_eq!(moves.len(), count);
    }

    #[test]
    fn test_no_widening_in_opening() {
        let mut mcts = Mcts::with_config(Board::new(), small_config());
        for _ in 0..10 {
            mcts.iteration();
        }
        assert!(!mcts.root().bigger_expanded);
        assert_eq!(mcts.stats().widenings, 0);
    }

    #[test]
    fn test_select_best_child_reroots() {
        let board = Board::from_moves([Pos::new(7, 7), Pos::new(8, 8)]).unwrap();
        let mut mcts = Mcts::with_config(board, small_config());
        mcts.search();

        let expected = mcts.snapshot().best().cloned().unwrap();
        let chosen = mcts.select_best_child().unwrap();
        assert_eq!(chosen, expected);

        let root = mcts.root();
        assert!(root.is_root());
        assert_eq!(root.depth, 1);
        assert_eq!(root.mv, Some(chosen.mv));
        assert_eq!(root.visits, chosen.visits);
        assert_eq!(mcts.board().stone_count(), 3);
    }

    #[test]
    fn test_select_best_child_without_children() {
        let mut mcts = Mcts::new(Board::new());
        assert_eq!(mcts.select_best_child(), None);
    }

    #[test]
    fn test_update_root_unknown_move_starts_fresh() {
        let mut mcts = Mcts::with_config(Board::new(), small_config());
        mcts.search();

        mcts.update_root(Pos::new(0, 0)).unwrap();
        let root = mcts.root();
        assert_eq!(root.visits, 0);
        assert_eq!(root.value, 0.0);
        assert_eq!(root.mv, Some(Pos::new(0, 0)));
        assert_eq!(mcts.tree().len(), 1);
    }

    #[test]
    fn test_add_children_skips_present_moves() {
        let board = Board::from_moves([Pos::new(7, 7)]).unwrap();
        let mut mcts = Mcts::new(board);
        let root = mcts.tree().root();

        assert_eq!(mcts.add_children(root, vec![Pos::new(6, 6), Pos::new(6, 7)]), 2);
        assert_eq!(mcts.add_children(root, vec![Pos::new(6, 7), Pos::new(8, 8)]), 1);
        assert_eq!(mcts.root().children.len(), 3);
        assert_eq!(mcts.stats().nodes_expanded, 3);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "is occupied")]
    fn test_add_children_rejects_occupied_candidate() {
        let board = Board::from_moves([Pos::new(7, 7)]).unwrap();
        let mut mcts = Mcts::new(board);
        let root = mcts.tree().root();
        mcts.add_children(root, vec![Pos::new(7, 7)]);
    }

    #[test]
    fn test_update_root_rejects_occupied_cell() {
        let board = Board::from_moves([Pos::new(7, 7)]).unwrap();
        let mut mcts = Mcts::new(board);
        assert_eq!(
            mcts.update_root(Pos::new(7, 7)),
            Err(BoardError::IllegalMove(Pos::new(7, 7)))
        );
    }
}
