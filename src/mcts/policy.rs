//! MCTS scoring and simulation.
//!
//! - `win_rate` / `ucb`: child selection
//! - `rollout`: heuristic-guided playout from a leaf
//! - `outcome_value`: terminal result from one player's perspective

use log::warn;

use super::node::Node;
use crate::core::{Board, SearchRng, Stone};
use crate::locations::{extend_vacancies, random_move, vacancy_set};
use crate::rules::GameOutcome;

/// Offset that keeps the statistics finite for unvisited nodes.
const VISIT_EPSILON: f64 = 0.01;

/// Map accumulated signed value to an approximate win probability.
///
/// For any reachable pair (`|value| <= visits`) the result lies in `[0, 1]`.
///
/// ```
/// use gomoku_mcts::mcts::win_rate;
///
/// assert_eq!(win_rate(0, 0.0), 0.5);
/// assert!(win_rate(10, 10.0) > 0.99);
/// assert!(win_rate(10, -10.0) < 0.01);
/// ```
#[inline]
#[must_use]
pub fn win_rate(visits: u32, value: f64) -> f64 {
    value / (2.0 * (visits as f64 + VISIT_EPSILON)) + 0.5
}

/// Upper confidence score of `child` under a parent visited `parent_visits` times.
///
/// Formula: `win_rate(child) + (N + 0.01)^0.25 / (n + 0.01)`
#[inline]
#[must_use]
pub fn ucb(parent_visits: u32, child: &Node) -> f64 {
    let exploration =
        (parent_visits as f64 + VISIT_EPSILON).powf(0.25) / (child.visits as f64 + VISIT_EPSILON);
    child.win_rate() + exploration
}

/// `+1` if `color` won, `-1` if it lost, `0` for a draw or no result.
#[must_use]
pub fn outcome_value(outcome: Option<GameOutcome>, color: Stone) -> f64 {
    match outcome.and_then(GameOutcome::winner) {
        Some(winner) if winner == color => 1.0,
        Some(_) => -1.0,
        None => 0.0,
    }
}

/// Play up to `max_plies` heuristic moves on a copy of `board`.
///
/// Returns the outcome from `color`'s perspective; a rollout that ends
/// without a winner scores 0. A board that is already decided is scored
/// as it stands.
pub fn rollout(
    board: &Board,
    color: Stone,
    bias: usize,
    max_plies: usize,
    rng: &mut SearchRng,
) -> f64 {
    let mut board = board.clone();
    let mut vacancies = vacancy_set(&board, bias);

    for _ in 0..max_plies {
        if board.is_game_over() {
            break;
        }
        let mut candidates: Vec<_> = vacancies.iter().copied().collect();
        candidates.sort_unstable();

        let Some(mv) = random_move(&board, &candidates, rng) else {
            break;
        };
        debug_assert!(board.is_legal_move(mv), "rollout drew occupied cell {mv}");
        if let Err(err) = board.place_stone(mv) {
            warn!("rollout stopped early: {err}");
            break;
        }
        extend_vacancies(&board, &mut vacancies, mv);
    }

    outcome_value(board.outcome(), color)
}
