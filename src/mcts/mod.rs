//! Monte Carlo Tree Search for Gomoku.
//!
//! ## Overview
//!
//! - **Arena tree**: nodes live in a flat vector and refer to each other by
//!   [`NodeId`]; rerooting compacts the arena.
//! - **Heuristic candidates**: expansion and rollouts draw from the key
//!   locations of [`crate::locations`] instead of every empty cell.
//! - **Widening**: shallow nodes of developed positions get one extra pass
//!   with a wider neighbourhood.
//! - **Tree reuse**: [`Mcts::select_best_child`] and [`Mcts::update_root`]
//!   keep the statistics of the branch actually played.
//! - **Interruptible**: [`Mcts::search_stream`] yields snapshots until a
//!   [`CancelToken`] fires.
//! - **Deterministic**: the same seed reproduces the same search.
//!
//! ## Usage
//!
//! ```rust
//! use gomoku_mcts::core::{Board, Pos};
//! use gomoku_mcts::mcts::{Mcts, SearchConfig};
//!
//! let board = Board::from_moves([Pos::new(7, 7)]).unwrap();
//! let config = SearchConfig::default().with_visit_budget(50);
//! let mut mcts = Mcts::with_config(board, config);
//!
//! mcts.search();
//! let chosen = mcts.select_best_child().unwrap();
//! assert!(chosen.visits > 0);
//!
//! // The opponent answers; its subtree is reused if it was explored.
//! let reply = Pos::new(6, 6);
//! if mcts.board().is_legal_move(reply) {
//!     mcts.update_root(reply).unwrap();
//! }
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod stream;
pub mod tree;

pub use config::SearchConfig;
pub use node::{Node, NodeId};
pub use policy::{outcome_value, rollout, ucb, win_rate};
pub use search::Mcts;
pub use stats::SearchStats;
pub use stream::{CancelToken, ChildSummary, RootSnapshot, SearchStream};
pub use tree::{MctsTree, TreeStats};
