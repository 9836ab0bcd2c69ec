//! Candidate generation integration tests.

use proptest::prelude::*;

use gomoku_mcts::core::{Board, Cell, Pos, SearchRng, Stone, BOARD_SIZE};
use gomoku_mcts::locations::{
    evaluate_fragment, extend_vacancies, get_key_locations, get_key_locations_info,
    get_vacancies, random_move, vacancy_set, Source,
};

fn legal_moves() -> impl Strategy<Value = Vec<Pos>> {
    prop::collection::vec((0..BOARD_SIZE, 0..BOARD_SIZE), 1..40).prop_map(|cells| {
        let mut seen = Vec::new();
        for (row, col) in cells {
            let pos = Pos::new(row, col);
            if !seen.contains(&pos) {
                seen.push(pos);
            }
        }
        seen
    })
}

fn cell() -> impl Strategy<Value = Cell> {
    prop_oneof![Just(None), Just(Some(Stone::Black)), Just(Some(Stone::White))]
}

// =============================================================================
// Vacancies
// =============================================================================

#[test]
fn test_empty_board_has_no_vacancies() {
    let board = Board::new();
    for bias in 0..5 {
        assert!(get_vacancies(&board, bias).is_empty());
    }
}

proptest! {
    #[test]
    fn prop_vacancies_exclude_played(moves in legal_moves(), bias in 0usize..4) {
        let board = Board::from_moves(moves.iter().copied()).unwrap();
        let vacancies = get_vacancies(&board, bias);
        for v in &vacancies {
            prop_assert!(!moves.contains(v));
            prop_assert!(board.is_legal_move(*v));
        }
    }

    #[test]
    fn prop_vacancies_are_sorted_and_unique(moves in legal_moves()) {
        let board = Board::from_moves(moves.iter().copied()).unwrap();
        let vacancies = get_vacancies(&board, 2);
        prop_assert!(vacancies.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_incremental_matches_rebuild(
        moves in legal_moves(),
        extra in (0..BOARD_SIZE, 0..BOARD_SIZE),
    ) {
        let mut board = Board::from_moves(moves.iter().copied()).unwrap();
        let played = Pos::from(extra);
        prop_assume!(board.is_legal_move(played));

        let mut set = vacancy_set(&board, 1);
        board.place_stone(played).unwrap();
        extend_vacancies(&board, &mut set, played);

        prop_assert_eq!(set, vacancy_set(&board, 1));
    }

    #[test]
    fn prop_key_locations_are_legal(moves in legal_moves()) {
        let board = Board::from_moves(moves.iter().copied()).unwrap();
        prop_assume!(!board.is_game_over());
        let vacancies = get_vacancies(&board, 1);
        let keys = get_key_locations(&board, 1);

        prop_assert!(!keys.is_empty());
        for k in &keys {
            prop_assert!(vacancies.contains(k));
        }
    }
}

// =============================================================================
// Fragment Scoring
// =============================================================================

proptest! {
    #[test]
    fn prop_mixed_windows_never_score(cells in prop::collection::vec(cell(), 5)) {
        let has_black = cells.contains(&Some(Stone::Black));
        let has_white = cells.contains(&Some(Stone::White));
        prop_assume!(has_black && has_white);

        prop_assert_eq!(evaluate_fragment(&cells, Stone::Black), None);
        prop_assert_eq!(evaluate_fragment(&cells, Stone::White), None);
    }

    #[test]
    fn prop_scores_are_positive(cells in prop::collection::vec(cell(), 5..=9)) {
        if let Some(score) = evaluate_fragment(&cells, Stone::Black) {
            prop_assert!(score.value >= 1.0);
        }
    }
}

#[test]
fn test_pure_five_scores_five_for_either_colour() {
    let white = [Some(Stone::White); 5];
    let score = evaluate_fragment(&white, Stone::Black).unwrap();
    assert_eq!(score.value, 5.0);
    assert_eq!(score.source, Source::Opponent);

    let score = evaluate_fragment(&white, Stone::White).unwrap();
    assert_eq!(score.value, 5.0);
    assert_eq!(score.source, Source::Own);
}

// =============================================================================
// Key Locations
// =============================================================================

#[test]
fn test_opening_move_is_centre() {
    assert_eq!(get_key_locations(&Board::new(), 1), vec![Pos::center()]);
}

#[test]
fn test_open_three_must_be_answered() {
    // White has an open three on row 7; Black has scattered stones.
    let board = Board::from_moves([
        Pos::new(2, 2),
        Pos::new(7, 6),
        Pos::new(12, 2),
        Pos::new(7, 7),
        Pos::new(2, 12),
        Pos::new(7, 8),
    ])
    .unwrap();
    let keys = get_key_locations(&board, 1);

    assert!(keys.contains(&Pos::new(7, 5)));
    assert!(keys.contains(&Pos::new(7, 9)));
    let infos = get_key_locations_info(&board, &get_vacancies(&board, 1));
    assert!(infos.iter().all(|i| i.opponent_value >= 2.75 || i.self_value >= 3.0));
}

#[test]
fn test_own_four_is_kept_over_blocks() {
    // Black: four on column 3. White: three on row 10.
    let board = Board::from_moves([
        Pos::new(3, 3),
        Pos::new(10, 8),
        Pos::new(4, 3),
        Pos::new(10, 9),
        Pos::new(5, 3),
        Pos::new(10, 10),
        Pos::new(6, 3),
        Pos::new(0, 14),
    ])
    .unwrap();
    let keys = get_key_locations(&board, 1);
    assert_eq!(keys, vec![Pos::new(2, 3), Pos::new(7, 3)]);
}

#[test]
fn test_random_move_wins_when_possible() {
    let board = Board::from_moves([
        Pos::new(3, 3),
        Pos::new(10, 8),
        Pos::new(4, 3),
        Pos::new(10, 9),
        Pos::new(5, 3),
        Pos::new(10, 10),
        Pos::new(6, 3),
        Pos::new(0, 14),
    ])
    .unwrap();
    let vacancies = get_vacancies(&board, 1);
    let mut rng = SearchRng::new(3);
    for _ in 0..20 {
        let mv = random_move(&board, &vacancies, &mut rng).unwrap();
        let after = board.with_move(mv).unwrap();
        assert_eq!(after.winner(), Some(Stone::Black));
    }
}
