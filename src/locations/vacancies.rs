//! Candidate cells near existing stones.
//!
//! Restricting moves to the neighbourhood of played stones keeps the
//! branching factor small: a few dozen cells instead of up to 225.

use rustc_hash::FxHashSet;

use crate::core::{Board, Pos};

/// Unordered vacancy set, maintained incrementally during rollouts.
pub type VacancySet = FxHashSet<Pos>;

/// All empty cells within Chebyshev distance `bias` of any stone.
///
/// An empty board yields an empty set for every bias.
#[must_use]
pub fn vacancy_set(board: &Board, bias: usize) -> VacancySet {
    let mut set = VacancySet::default();
    for &stone in board.moves() {
        set.extend(stone.square(bias).filter(|&p| board.is_legal_move(p)));
    }
    set
}

/// Like [`vacancy_set`], in row-major order.
///
/// ```
/// use gomoku_mcts::core::{Board, Pos};
/// use gomoku_mcts::locations::get_vacancies;
///
/// assert!(get_vacancies(&Board::new(), 3).is_empty());
///
/// let board = Board::from_moves([Pos::new(0, 0)]).unwrap();
/// let cells = get_vacancies(&board, 1);
/// assert_eq!(cells, vec![Pos::new(0, 1), Pos::new(1, 0), Pos::new(1, 1)]);
/// ```
#[must_use]
pub fn get_vacancies(board: &Board, bias: usize) -> Vec<Pos> {
    let mut cells: Vec<Pos> = vacancy_set(board, bias).into_iter().collect();
    cells.sort_unstable();
    cells
}

/// Update a vacancy set after `played` was placed on `board`.
///
/// Adds the empty cells of the 3×3 neighbourhood around `played` and
/// removes `played` itself.
pub fn extend_vacancies(board: &Board, set: &mut VacancySet, played: Pos) {
    set.extend(played.square(1).filter(|&p| board.is_legal_move(p)));
    set.remove(&played);
}
