//! # gomoku-mcts
//!
//! A Gomoku (five-in-a-row, 15x15) engine built around a heuristic-guided
//! Monte Carlo Tree Search.
//!
//! ## Design Principles
//!
//! 1. **Small branching factor**: candidates come from a threat-scoring
//!    heuristic that keeps only the moves answering the most severe threat
//!    on the board.
//!
//! 2. **Queries don't mutate**: game end is a pure `outcome()` query; the
//!    player to move follows from the move count.
//!
//! 3. **Reproducible**: all randomness flows from one seeded RNG.
//!
//! ## Architecture
//!
//! - **Arena MCTS**: nodes addressed by index, subtrees detached by
//!   rerooting and compacted.
//!
//! - **Persistent history**: moves are an `im::Vector`, so node snapshots
//!   share history.
//!
//! - **Cooperative cancellation**: the streaming search checks a shared
//!   flag once per iteration.
//!
//! ## Modules
//!
//! - `core`: positions, stones, board and RNG
//! - `rules`: five-in-a-row detection and game outcome
//! - `locations`: vacancies, threat scoring, tactical filter, sampling
//! - `mcts`: configuration, arena tree, policy, search and streaming

pub mod core;
pub mod locations;
pub mod mcts;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{Board, BoardError, Cell, Pos, SearchRng, Stone, BOARD_SIZE};

pub use crate::rules::{GameOutcome, WIN_LENGTH};

pub use crate::locations::{
    get_key_locations, get_key_locations_info, get_vacancies, random_move, LocationInfo,
};

pub use crate::mcts::{
    CancelToken, ChildSummary, Mcts, MctsTree, NodeId, RootSnapshot, SearchConfig, SearchStats,
};
