//! Board coordinates and line geometry.
//!
//! A `Pos` is a plain `(row, col)` pair. Range validation of external input
//! belongs to the caller; `Pos::offset` is the only constructor that checks
//! the grid bounds, because line scans walk off the edge routinely.
//!
//! ```
//! use gomoku_mcts::core::{Pos, BOARD_SIZE};
//!
//! let corner = Pos::new(0, 0);
//! assert_eq!(corner.offset(-1, 0), None);
//! assert_eq!(corner.offset(1, 1), Some(Pos::new(1, 1)));
//! assert!(Pos::new(BOARD_SIZE - 1, BOARD_SIZE - 1).is_on_board());
//! ```

use serde::{Deserialize, Serialize};

/// Board dimension (15×15).
pub const BOARD_SIZE: usize = 15;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// The four line orientations: horizontal, vertical, and both diagonals.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A cell coordinate. Ordering is row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    /// Create a new position.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The centre cell, used as the opening move.
    #[must_use]
    pub const fn center() -> Self {
        Self::new(BOARD_SIZE / 2, BOARD_SIZE / 2)
    }

    /// Check whether this position lies inside the grid.
    #[inline]
    #[must_use]
    pub const fn is_on_board(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Step by `(dr, dc)`, returning `None` if the result leaves the grid.
    #[inline]
    #[must_use]
    pub fn offset(self, dr: isize, dc: isize) -> Option<Pos> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let pos = Pos::new(row, col);
        pos.is_on_board().then_some(pos)
    }

    /// Row-major cell index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    /// All on-board cells within Chebyshev distance `radius`, including `self`.
    pub fn square(self, radius: usize) -> impl Iterator<Item = Pos> {
        let r = radius as isize;
        (-r..=r).flat_map(move |dr| (-r..=r).filter_map(move |dc| self.offset(dr, dc)))
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Pos {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}
