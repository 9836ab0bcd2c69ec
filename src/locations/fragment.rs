//! Threat scoring of a single line fragment.
//!
//! A fragment is the run of at most nine cells along one direction centred
//! on a candidate cell. A width-5 window slides over it; a window holding
//! stones of only one colour scores its stone count for that colour, and a
//! window holding both colours is dead.

use serde::{Deserialize, Serialize};

use crate::core::{Cell, Stone};
use crate::rules::WIN_LENGTH;

/// Whose stones produced a score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// The player to move.
    Own,
    /// The other player.
    Opponent,
}

/// Best window score of a fragment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineScore {
    pub value: f64,
    pub source: Source,
}

impl LineScore {
    #[must_use]
    pub const fn new(value: f64, source: Source) -> Self {
        Self { value, source }
    }
}

/// Bonus for a lone stone when nothing stronger of the same colour was seen.
const SINGLE_STONE_BONUS: f64 = 0.25;

/// A lone-stone window only earns the bonus while the best score is below this.
const SINGLE_STONE_CEILING: f64 = 1.5;

/// Bonus for a second window matching the best score of the same colour.
const DOUBLE_PATTERN_BONUS: f64 = 0.5;

/// Score a fragment from `perspective`'s point of view.
///
/// Windows are scanned left to right, tracking the best score so far. Two
/// adjustments apply to a window whose source matches the current best:
///
/// - a count of exactly 1 gains `+0.25` if the best is below 1.5;
/// - a count of 2 or more that ties the best gains `+0.5`.
///
/// Returns `None` when no window holds stones of a single colour.
///
/// ```
/// use gomoku_mcts::core::Stone;
/// use gomoku_mcts::locations::{evaluate_fragment, Source};
///
/// let b = Some(Stone::Black);
/// let score = evaluate_fragment(&[b, b, b, b, b], Stone::Black).unwrap();
/// assert_eq!(score.value, 5.0);
/// assert_eq!(score.source, Source::Own);
///
/// let w = Some(Stone::White);
/// assert!(evaluate_fragment(&[b, None, w, None, None], Stone::Black).is_none());
/// ```
#[must_use]
pub fn evaluate_fragment(fragment: &[Cell], perspective: Stone) -> Option<LineScore> {
    let opponent = perspective.opponent();
    let mut best: Option<LineScore> = None;

    for window in fragment.windows(WIN_LENGTH) {
        let own = window.iter().filter(|&&c| c == Some(perspective)).count();
        let theirs = window.iter().filter(|&&c| c == Some(opponent)).count();

        let (count, source) = match (own, theirs) {
            (0, 0) => continue,
            (n, 0) => (n, Source::Own),
            (0, n) => (n, Source::Opponent),
            _ => continue,
        };

        let mut value = count as f64;
        if let Some(b) = best.filter(|b| b.source == source) {
            if count == 1 && b.value < SINGLE_STONE_CEILING {
                value += SINGLE_STONE_BONUS;
            } else if count >= 2 && value == b.value {
                value += DOUBLE_PATTERN_BONUS;
            }
        }

        if best.map_or(true, |b| value > b.value) {
            best = Some(LineScore::new(value, source));
        }
    }

    best
}
