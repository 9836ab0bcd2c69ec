//! Core engine types: coordinates, stones, board state and RNG.

pub mod board;
pub mod player;
pub mod pos;
pub mod rng;

pub use board::{Board, BoardError};
pub use player::{Cell, Stone};
pub use pos::{Pos, BOARD_SIZE, CELL_COUNT, DIRECTIONS};
pub use rng::SearchRng;
