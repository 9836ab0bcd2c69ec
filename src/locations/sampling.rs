//! Heuristic-weighted move sampling for rollouts.

use super::key_locations::get_key_locations_info;
use crate::core::{Board, Pos, SearchRng};

/// Sample a key location with softmax weights over the combined score.
///
/// Returns `None` only if `vacancies` is empty. If rounding leaves the
/// cumulative probability short of the draw, the last candidate is taken.
pub fn random_move(board: &Board, vacancies: &[Pos], rng: &mut SearchRng) -> Option<Pos> {
    let infos = get_key_locations_info(board, vacancies);

    // Shifting by the maximum leaves the softmax unchanged and keeps exp() finite.
    let max = infos
        .iter()
        .map(|i| i.total())
        .fold(f64::NEG_INFINITY, f64::max);
    let weights: Vec<f64> = infos.iter().map(|i| (i.total() - max).exp()).collect();
    let sum: f64 = weights.iter().sum();
    let probabilities: Vec<f64> = weights.iter().map(|w| w / sum).collect();

    pick(&probabilities, rng.gen_f64()).map(|index| infos[index].position)
}

/// Index whose cumulative probability first exceeds `draw`.
///
/// Falls back to the last index when the probabilities sum to less than
/// `draw`. Returns `None` only for an empty slice.
fn pick(probabilities: &[f64], draw: f64) -> Option<usize> {
    let mut cumulative = 0.0;
    for (index, p) in probabilities.iter().enumerate() {
        cumulative += p;
        if draw < cumulative {
            return Some(index);
        }
    }
    probabilities.len().checked_sub(1)
}
