//! Interruptible search.
//!
//! [`SearchStream`] runs iterations lazily and yields a [`RootSnapshot`]
//! every `snapshot_interval` root visits. A [`CancelToken`] handed to
//! another thread stops it at the next iteration boundary.
//!
//! ```
//! use gomoku_mcts::core::Board;
//! use gomoku_mcts::mcts::{CancelToken, Mcts, SearchConfig};
//!
//! let config = SearchConfig::default().with_snapshot_interval(10);
//! let mut mcts = Mcts::with_config(Board::new(), config);
//! let cancel = CancelToken::new();
//!
//! let mut last = None;
//! for snapshot in mcts.search_stream(cancel.clone()) {
//!     if snapshot.visits >= 30 {
//!         cancel.cancel();
//!     }
//!     last = Some(snapshot);
//! }
//! assert_eq!(last.unwrap().visits, 30);
//! ```

use std::iter::FusedIterator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::node::Node;
use super::search::Mcts;
use crate::core::Pos;

/// Cooperative cancellation signal shared between a search and its owner.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the running state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that the search stop.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Statistics of one root child.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChildSummary {
    pub mv: Pos,
    pub visits: u32,
    pub value: f64,
    pub win_rate: f64,
}

impl ChildSummary {
    /// Summarise a non-root node. Returns `None` for a node without a move.
    #[must_use]
    pub fn from_node(node: &Node) -> Option<Self> {
        Some(Self {
            mv: node.mv?,
            visits: node.visits,
            value: node.value,
            win_rate: node.win_rate(),
        })
    }
}

/// Observable state of the root at one point of a search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RootSnapshot {
    pub visits: u32,
    pub value: f64,
    /// One entry per root child, in expansion order.
    pub children: Vec<ChildSummary>,
}

impl RootSnapshot {
    /// The child with the highest win rate (first on ties).
    #[must_use]
    pub fn best(&self) -> Option<&ChildSummary> {
        self.children
            .iter()
            .fold(None, |best: Option<&ChildSummary>, c| match best {
                Some(b) if b.win_rate >= c.win_rate => Some(b),
                _ => Some(c),
            })
    }
}

/// Lazily running search; see the module docs.
///
/// Ends when the token is cancelled or the root position is decided, and
/// stays ended afterwards.
pub struct SearchStream<'a> {
    mcts: &'a mut Mcts,
    cancel: CancelToken,
    interval: u32,
    start: Instant,
    done: bool,
}

impl<'a> SearchStream<'a> {
    pub(super) fn new(mcts: &'a mut Mcts, cancel: CancelToken) -> Self {
        let interval = mcts.config().snapshot_interval.max(1);
        mcts.begin_search();
        Self {
            mcts,
            cancel,
            interval,
            start: Instant::now(),
            done: false,
        }
    }

    fn finish(&mut self) {
        self.done = true;
        self.mcts.finish_search(self.start);
    }
}

impl Iterator for SearchStream<'_> {
    type Item = RootSnapshot;

    fn next(&mut self) -> Option<RootSnapshot> {
        while !self.done {
            if self.cancel.is_cancelled() || self.mcts.board().is_game_over() {
                self.finish();
                break;
            }

            self.mcts.iteration();

            let visits = self.mcts.root().visits;
            if visits > 0 && visits % self.interval == 0 {
                return Some(self.mcts.snapshot());
            }
        }
        None
    }
}

impl FusedIterator for SearchStream<'_> {}

impl Drop for SearchStream<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.finish();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use super::*;
    use crate::core::Board;
    use crate::mcts::SearchConfig;

    #[test]
    fn test_cancel_token_is_shared() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_cancelled_before_start_yields_nothing() {
        let mut mcts = Mcts::new(Board::new());
        let token = CancelToken::new();
        token.cancel();

        let mut stream = mcts.search_stream(token);
        assert!(stream.next().is_none());
        assert!(stream.next().is_none());
        drop(stream);
        assert_eq!(mcts.root().visits, 0);
    }

    #[test]
    fn test_snapshots_every_interval() {
        let config = SearchConfig::default().with_snapshot_interval(5);
        let mut mcts = Mcts::with_config(Board::new(), config);
        let token = CancelToken::new();

        let visits: Vec<u32> = mcts
            .search_stream(token.clone())
            .take(4)
            .map(|s| s.visits)
            .collect();
        assert_eq!(visits, vec![5, 10, 15, 20]);
    }

    #[test]
    fn test_stream_is_fused_after_cancel() {
        let config = SearchConfig::default().with_snapshot_interval(3);
        let mut mcts = Mcts::with_config(Board::new(), config);
        let token = CancelToken::new();

        let mut stream = mcts.search_stream(token.clone());
        assert!(stream.next().is_some());
        token.cancel();
        assert!(stream.next().is_none());
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_dropped_stream_records_time() {
        let config = SearchConfig::default().with_snapshot_interval(5);
        let mut mcts = Mcts::with_config(Board::new(), config);

        let mut stream = mcts.search_stream(CancelToken::new());
        assert!(stream.next().is_some());
        thread::sleep(Duration::from_millis(2));
        drop(stream);

        assert_eq!(mcts.stats().iterations, 5);
        assert!(mcts.stats().time_us >= 2_000);
    }

    #[test]
    fn test_best_prefers_first_on_ties() {
        let snapshot = RootSnapshot {
            visits: 3,
            value: 0.0,
            children: vec![
                ChildSummary {
                    mv: Pos::new(1, 1),
                    visits: 1,
                    value: 0.0,
                    win_rate: 0.5,
                },
                ChildSummary {
                    mv: Pos::new(2, 2),
                    visits: 1,
                    value: 0.0,
                    win_rate: 0.5,
                },
            ],
        };
        assert_eq!(snapshot.best().map(|c| c.mv), Some(Pos::new(1, 1)));
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = RootSnapshot {
            visits: 10,
            value: 0.0,
            children: vec![ChildSummary {
                mv: Pos::new(7, 7),
                visits: 9,
                value: 3.0,
                win_rate: 0.66,
            }],
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let deserialized: RootSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, deserialized);
    }
}
