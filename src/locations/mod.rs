//! Heuristic candidate-move generation.
//!
//! ## Overview
//!
//! The empty board offers up to 225 moves, far too many for a tree search.
//! This module prunes them in three steps:
//!
//! 1. **Vacancies**: empty cells near existing stones ([`get_vacancies`]).
//! 2. **Scoring**: each vacancy is scored along the four line directions
//!    for attack and defence potential ([`evaluate_fragment`]).
//! 3. **Tactical filter**: a cascade of forced-response rules keeps only the
//!    moves answering the most severe threat ([`get_key_locations_info`]).
//!
//! Rollouts use [`random_move`], a softmax draw over the surviving moves.
//!
//! ## Usage
//!
//! ```rust
//! use gomoku_mcts::core::{Board, Pos, SearchRng};
//! use gomoku_mcts::locations::{get_key_locations, get_vacancies, random_move};
//!
//! let board = Board::from_moves([Pos::new(7, 7), Pos::new(7, 8)]).unwrap();
//! let candidates = get_key_locations(&board, 1);
//! assert!(!candidates.is_empty());
//!
//! let mut rng = SearchRng::new(42);
//! let mv = random_move(&board, &get_vacancies(&board, 1), &mut rng).unwrap();
//! assert!(board.is_legal_move(mv));
//! ```

pub mod fragment;
pub mod key_locations;
pub mod sampling;
pub mod vacancies;

pub use fragment::{evaluate_fragment, LineScore, Source};
pub use key_locations::{get_key_locations, get_key_locations_info, thresholds, LocationInfo};
pub use sampling::random_move;
pub use vacancies::{extend_vacancies, get_vacancies, vacancy_set, VacancySet};
