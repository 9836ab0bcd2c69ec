//! Board state: stone placement, legality and move history.
//!
//! ## Invariants
//!
//! - Every cell appears at most once in `moves`.
//! - `grid[c]` is empty iff `c` is not in `moves`; the grid can always be
//!   rebuilt by replaying `moves` into a fresh board.
//! - The player to move is a pure function of `moves.len()`.
//!
//! Game-end detection is a query (`outcome`) that never mutates the board.
//!
//! `moves` is an `im::Vector`, so cloning a board for a tree node or a
//! rollout shares the history and only copies the 225-cell grid.

use im::Vector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::{Cell, Stone};
use super::pos::{Pos, BOARD_SIZE, CELL_COUNT};
use crate::rules::{self, GameOutcome};

/// Errors raised by stone placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The target cell already holds a stone.
    #[error("illegal move at {0}: cell is occupied")]
    IllegalMove(Pos),

    /// The coordinate lies outside the grid.
    #[error("position {0} is outside the board")]
    OutOfBounds(Pos),
}

/// A Gomoku board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(with = "grid_serde")]
    grid: [Cell; CELL_COUNT],
    moves: Vector<Pos>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            grid: [None; CELL_COUNT],
            moves: Vector::new(),
        }
    }

    /// Replay an ordered move list into a fresh board.
    ///
    /// Every move must be legal at the time it is replayed.
    ///
    /// ```
    /// use gomoku_mcts::core::{Board, Pos, Stone};
    ///
    /// let board = Board::from_moves([Pos::new(7, 7), Pos::new(7, 8)]).unwrap();
    /// assert_eq!(board.get(Pos::new(7, 7)), Some(Stone::Black));
    /// assert_eq!(board.current_player(), Stone::Black);
    ///
    /// assert!(Board::from_moves([Pos::new(3, 3), Pos::new(3, 3)]).is_err());
    /// ```
    pub fn from_moves(moves: impl IntoIterator<Item = Pos>) -> Result<Self, BoardError> {
        let mut board = Self::new();
        for mv in moves {
            board.place_stone(mv)?;
        }
        Ok(board)
    }

    /// Board dimension.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        BOARD_SIZE
    }

    /// Contents of a cell. Off-board positions read as empty.
    #[inline]
    #[must_use]
    pub fn get(&self, pos: Pos) -> Cell {
        if pos.is_on_board() {
            self.grid[pos.index()]
        } else {
            None
        }
    }

    /// The full grid in row-major order.
    #[must_use]
    pub fn grid(&self) -> &[Cell] {
        &self.grid
    }

    /// Placed stones in the order they were played.
    #[must_use]
    pub fn moves(&self) -> &Vector<Pos> {
        &self.moves
    }

    /// Number of stones on the board.
    #[inline]
    #[must_use]
    pub fn stone_count(&self) -> usize {
        self.moves.len()
    }

    /// Whether no stone has been placed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Whether every cell is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.moves.len() == CELL_COUNT
    }

    /// The most recently placed stone.
    #[must_use]
    pub fn last_move(&self) -> Option<Pos> {
        self.moves.last().copied()
    }

    /// The player who placed the most recent stone.
    #[must_use]
    pub fn last_mover(&self) -> Option<Stone> {
        self.last_move().and_then(|pos| self.get(pos))
    }

    /// The player to move.
    #[inline]
    #[must_use]
    pub fn current_player(&self) -> Stone {
        Stone::to_move_after(self.moves.len())
    }

    /// A move is legal iff the target cell is on the board and empty.
    #[inline]
    #[must_use]
    pub fn is_legal_move(&self, pos: Pos) -> bool {
        pos.is_on_board() && self.grid[pos.index()].is_none()
    }

    /// Place a stone for the current player.
    ///
    /// # Errors
    ///
    /// - [`BoardError::OutOfBounds`] if `pos` is outside the grid.
    /// - [`BoardError::IllegalMove`] if the cell is occupied.
    pub fn place_stone(&mut self, pos: Pos) -> Result<(), BoardError> {
        if !pos.is_on_board() {
            return Err(BoardError::OutOfBounds(pos));
        }
        if self.grid[pos.index()].is_some() {
            return Err(BoardError::IllegalMove(pos));
        }
        self.grid[pos.index()] = Some(self.current_player());
        self.moves.push_back(pos);
        Ok(())
    }

    /// A copy of this board with `pos` played.
    pub fn with_move(&self, pos: Pos) -> Result<Self, BoardError> {
        let mut next = self.clone();
        next.place_stone(pos)?;
        Ok(next)
    }

    /// Result of the game, if it has ended.
    ///
    /// Only the most recent stone can complete a new five, so the scan is
    /// anchored there. A full board without a five is a draw.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        rules::outcome(self)
    }

    /// Whether the game has ended (win or draw).
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// The winning player, if any. Unset for draws and ongoing games.
    #[must_use]
    pub fn winner(&self) -> Option<Stone> {
        self.outcome().and_then(GameOutcome::winner)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "   ")?;
        for col in 0..BOARD_SIZE {
            write!(f, "{:>2}", col)?;
        }
        writeln!(f)?;
        for row in 0..BOARD_SIZE {
            write!(f, "{:>2} ", row)?;
            for col in 0..BOARD_SIZE {
                let ch = self.get(Pos::new(row, col)).map_or('.', Stone::symbol);
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Serde does not derive for arrays longer than 32, so the grid goes
/// through a `Vec`.
mod grid_serde {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{Cell, CELL_COUNT};

    pub fn serialize<S: Serializer>(grid: &[Cell; CELL_COUNT], s: S) -> Result<S::Ok, S::Error> {
        grid.as_slice().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[Cell; CELL_COUNT], D::Error> {
        let cells = Vec::<Cell>::deserialize(d)?;
        let len = cells.len();
        cells
            .try_into()
            .map_err(|_| D::Error::invalid_length(len, &"225 cells"))
    }
}
