//! Five-in-a-row detection and game outcomes.

use serde::{Deserialize, Serialize};

use crate::core::{Board, Pos, Stone, CELL_COUNT, DIRECTIONS};

/// Number of contiguous stones needed to win.
pub const WIN_LENGTH: usize = 5;

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// The given player completed five in a row.
    Win(Stone),
    /// The board filled up without a five.
    Draw,
}

impl GameOutcome {
    /// The winning player, `None` for a draw.
    #[must_use]
    pub const fn winner(self) -> Option<Stone> {
        match self {
            GameOutcome::Win(stone) => Some(stone),
            GameOutcome::Draw => None,
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(self, player: Stone) -> bool {
        self.winner() == Some(player)
    }
}

/// Evaluate the game state through the most recent stone.
///
/// Returns `None` while the game continues.
#[must_use]
pub fn outcome(board: &Board) -> Option<GameOutcome> {
    let last = board.last_move()?;
    let mover = board.get(last)?;

    if DIRECTIONS
        .iter()
        .any(|&(dr, dc)| line_length(board, last, mover, dr, dc) >= WIN_LENGTH)
    {
        return Some(GameOutcome::Win(mover));
    }

    (board.stone_count() == CELL_COUNT).then_some(GameOutcome::Draw)
}

/// Length of the run of `stone` through `anchor` along `(dr, dc)`,
/// counting the anchor and extending both ways to the board edge.
#[must_use]
pub fn line_length(board: &Board, anchor: Pos, stone: Stone, dr: isize, dc: isize) -> usize {
    1 + run_length(board, anchor, stone, dr, dc) + run_length(board, anchor, stone, -dr, -dc)
}

fn run_length(board: &Board, anchor: Pos, stone: Stone, dr: isize, dc: isize) -> usize {
    std::iter::successors(anchor.offset(dr, dc), |p| p.offset(dr, dc))
        .take_while(|&p| board.get(p) == Some(stone))
        .count()
}
