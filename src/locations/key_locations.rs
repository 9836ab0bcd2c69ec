//! Candidate scoring and the tactical filter cascade.
//!
//! Every vacancy is scored along the four line directions. Scores are
//! aggregated per source, then a cascade of forced-response rules keeps
//! only the moves that answer the most severe threat on the board. If no
//! rule fires, the best five spots by combined score survive.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::fragment::{evaluate_fragment, LineScore, Source};
use super::vacancies::get_vacancies;
use crate::core::{Board, Cell, Pos, DIRECTIONS};
use crate::rules::WIN_LENGTH;

/// Cells scanned on each side of a candidate along one direction.
pub const FRAGMENT_REACH: isize = 4;

/// Weight ratio between consecutive ranked scores of the same source.
pub const RANK_DECAY: f64 = 0.1;

/// Tactical filter thresholds.
///
/// These are empirically tuned constants, not derived invariants. Changing
/// them changes playing strength but not correctness.
pub mod thresholds {
    /// A completed or completable four.
    pub const FOUR: f64 = 4.0;
    /// An opponent three strong enough to demand a response.
    pub const STRONG_THREE: f64 = 3.25;
    /// A plain three (own counter-threat strength).
    pub const THREE: f64 = 3.0;
    /// Lower edge of the borderline open-three band `[2.75, 3)`.
    pub const OPEN_THREE: f64 = 2.75;
    /// A moderate threat by either side.
    pub const MODERATE: f64 = 2.5;
    /// Contested band `[1.5, 2)` on both sides.
    pub const CONTESTED_LOW: f64 = 1.5;
    pub const CONTESTED_HIGH: f64 = 2.0;
    /// Candidates kept when no rule fires.
    pub const FALLBACK_COUNT: usize = 5;
}

/// Scored candidate for one search step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub position: Pos,
    /// One entry per scanned direction that produced a positive score.
    pub values: SmallVec<[LineScore; 4]>,
    pub self_value: f64,
    pub opponent_value: f64,
}

impl LocationInfo {
    /// A candidate with no scored direction.
    #[must_use]
    pub fn unscored(position: Pos) -> Self {
        Self {
            position,
            values: SmallVec::new(),
            self_value: 0.0,
            opponent_value: 0.0,
        }
    }

    /// Combined attack and defence score.
    #[inline]
    #[must_use]
    pub fn total(&self) -> f64 {
        self.self_value + self.opponent_value
    }

    fn aggregate(&mut self) {
        self.self_value = ranked_sum(&self.values, Source::Own);
        self.opponent_value = ranked_sum(&self.values, Source::Opponent);
    }
}

/// Sum of one source's scores in descending order, weighted `RANK_DECAY^rank`.
fn ranked_sum(values: &[LineScore], source: Source) -> f64 {
    let mut ranked: SmallVec<[f64; 4]> = values
        .iter()
        .filter(|s| s.source == source)
        .map(|s| s.value)
        .collect();
    ranked.sort_unstable_by(|a, b| b.total_cmp(a));

    let mut weight = 1.0;
    let mut sum = 0.0;
    for value in ranked {
        sum += value * weight;
        weight *= RANK_DECAY;
    }
    sum
}

/// The line of cells through `center` along `(dr, dc)`, clipped to the board.
fn fragment(board: &Board, center: Pos, dr: isize, dc: isize) -> SmallVec<[Cell; 9]> {
    (-FRAGMENT_REACH..=FRAGMENT_REACH)
        .filter_map(|k| center.offset(dr * k, dc * k))
        .map(|p| board.get(p))
        .collect()
}

/// Score one vacancy from the point of view of the player to move.
fn score_location(board: &Board, position: Pos) -> LocationInfo {
    let perspective = board.current_player();
    let mut info = LocationInfo::unscored(position);

    for &(dr, dc) in &DIRECTIONS {
        let cells = fragment(board, position, dr, dc);
        if cells.len() < WIN_LENGTH {
            continue;
        }
        if let Some(score) = evaluate_fragment(&cells, perspective) {
            if score.value > 0.0 {
                info.values.push(score);
            }
        }
    }

    info.aggregate();
    info
}

type Predicate = fn(&LocationInfo) -> bool;

/// One forced-response rule: if any candidate triggers it, keep the
/// candidates that satisfy `keep`.
struct Rule {
    trigger: Predicate,
    keep: Predicate,
}

fn in_band(value: f64, low: f64, high: f64) -> bool {
    (low..high).contains(&value)
}

fn has_four(i: &LocationInfo) -> bool {
    i.self_value >= thresholds::FOUR || i.opponent_value >= thresholds::FOUR
}

fn opponent_strong_three(i: &LocationInfo) -> bool {
    i.opponent_value >= thresholds::STRONG_THREE
}

fn answers_strong_three(i: &LocationInfo) -> bool {
    opponent_strong_three(i) || i.self_value >= thresholds::THREE
}

fn opponent_open_three(i: &LocationInfo) -> bool {
    in_band(i.opponent_value, thresholds::OPEN_THREE, thresholds::THREE)
}

fn answers_open_three(i: &LocationInfo) -> bool {
    i.opponent_value >= thresholds::OPEN_THREE || i.self_value >= thresholds::THREE
}

fn own_three(i: &LocationInfo) -> bool {
    i.self_value >= thresholds::STRONG_THREE
        || in_band(i.self_value, thresholds::OPEN_THREE, thresholds::THREE)
}

fn offensive(i: &LocationInfo) -> bool {
    i.self_value >= thresholds::OPEN_THREE
}

fn moderate(i: &LocationInfo) -> bool {
    i.self_value >= thresholds::MODERATE || i.opponent_value >= thresholds::MODERATE
}

fn contested(i: &LocationInfo) -> bool {
    in_band(i.self_value, thresholds::CONTESTED_LOW, thresholds::CONTESTED_HIGH)
        && in_band(i.opponent_value, thresholds::CONTESTED_LOW, thresholds::CONTESTED_HIGH)
}

/// Ordered cascade; the first rule that fires decides. Every `keep` accepts
/// whatever its `trigger` accepts, so a firing rule never empties the set.
static CASCADE: [Rule; 6] = [
    Rule {
        trigger: has_four,
        keep: has_four,
    },
    Rule {
        trigger: opponent_strong_three,
        keep: answers_strong_three,
    },
    Rule {
        trigger: opponent_open_three,
        keep: answers_open_three,
    },
    Rule {
        trigger: own_three,
        keep: offensive,
    },
    Rule {
        trigger: moderate,
        keep: moderate,
    },
    Rule {
        trigger: contested,
        keep: contested,
    },
];

fn tactical_filter(mut infos: Vec<LocationInfo>) -> Vec<LocationInfo> {
    if let Some(rule) = CASCADE.iter().find(|r| infos.iter().any(r.trigger)) {
        infos.retain(rule.keep);
        return infos;
    }

    infos.sort_by(|a, b| b.total().total_cmp(&a.total()));
    infos.truncate(thresholds::FALLBACK_COUNT);
    infos
}

/// Score `vacancies` and reduce them to the tactically relevant set.
///
/// If no vacancy scores, a single unscored candidate is returned so the
/// search always has a move. Returns an empty list only for an empty
/// vacancy list.
#[must_use]
pub fn get_key_locations_info(board: &Board, vacancies: &[Pos]) -> Vec<LocationInfo> {
    let scored: Vec<LocationInfo> = vacancies
        .iter()
        .map(|&p| score_location(board, p))
        .filter(|info| !info.values.is_empty())
        .collect();

    if scored.is_empty() {
        return vacancies
            .first()
            .map(|&p| vec![LocationInfo::unscored(p)])
            .unwrap_or_default();
    }

    tactical_filter(scored)
}

/// Positions worth searching within `bias` of the existing stones.
///
/// On an empty board the centre is the only key location.
///
/// ```
/// use gomoku_mcts::core::{Board, Pos};
/// use gomoku_mcts::locations::get_key_locations;
///
/// assert_eq!(get_key_locations(&Board::new(), 1), vec![Pos::center()]);
/// ```
#[must_use]
pub fn get_key_locations(board: &Board, bias: usize) -> Vec<Pos> {
    if board.is_empty() {
        return vec![Pos::center()];
    }
    get_key_locations_info(board, &get_vacancies(board, bias))
        .into_iter()
        .map(|info| info.position)
        .collect()
}
