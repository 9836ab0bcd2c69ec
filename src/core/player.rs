//! Players and stone colours.
//!
//! Gomoku is strictly two-player, so a player is identified by the colour of
//! the stones they place. `Black` always moves first.

use serde::{Deserialize, Serialize};

/// A stone colour, doubling as the player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stone {
    Black,
    White,
}

/// Contents of a single grid cell.
pub type Cell = Option<Stone>;

impl Stone {
    /// The player who places the first stone.
    pub const FIRST: Stone = Stone::Black;

    /// The other player.
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }

    /// Signed identifier: `+1` for Black, `-1` for White.
    ///
    /// ```
    /// use gomoku_mcts::core::Stone;
    ///
    /// assert_eq!(Stone::Black.sign(), 1);
    /// assert_eq!(Stone::White.sign(), -1);
    /// assert_eq!(Stone::Black.opponent().sign(), -1);
    /// ```
    #[inline]
    #[must_use]
    pub const fn sign(self) -> i8 {
        match self {
            Stone::Black => 1,
            Stone::White => -1,
        }
    }

    /// The player to move after `move_count` stones have been placed.
    #[inline]
    #[must_use]
    pub const fn to_move_after(move_count: usize) -> Self {
        if move_count % 2 == 0 {
            Self::FIRST
        } else {
            Self::FIRST.opponent()
        }
    }

    /// Single-character symbol used in board dumps.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Stone::Black => 'X',
            Stone::White => 'O',
        }
    }
}

impl std::fmt::Display for Stone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stone::Black => write!(f, "Black"),
            Stone::White => write!(f, "White"),
        }
    }
}
