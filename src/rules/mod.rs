//! Game rules: five-in-a-row detection and outcomes.
//!
//! The board calls into this module for its game-end query. Detection only
//! scans the four lines through the most recent stone.

pub mod outcome;

pub use outcome::{line_length, outcome, GameOutcome, WIN_LENGTH};
