//! Season ranking: fixed tie-break chain, dense positions, qualification cutoff.

use crate::models::{EntrantTotals, RankedEntrant};
use std::cmp::Ordering;

/// Below this many entrants, 4 qualify for the final; from it on, 6.
pub const LARGE_FIELD_THRESHOLD: usize = 9;

type CmpFunc = fn(&EntrantTotals, &EntrantTotals) -> Ordering;

fn compare_match_points(a: &EntrantTotals, b: &EntrantTotals) -> Ordering {
    b.total_match_points.cmp(&a.total_match_points)
}

fn compare_moyenne(a: &EntrantTotals, b: &EntrantTotals) -> Ordering {
    b.avg_moyenne.total_cmp(&a.avg_moyenne)
}

fn compare_serie(a: &EntrantTotals, b: &EntrantTotals) -> Ordering {
    b.best_serie.cmp(&a.best_serie)
}

// Last resort so that no two entrants ever share a position.
fn compare_licence(a: &EntrantTotals, b: &EntrantTotals) -> Ordering {
    a.licence.cmp(&b.licence)
}

/// Tie-break chain, most significant first.
const RANK_CRITERIA: [CmpFunc; 4] = [
    compare_match_points,
    compare_moyenne,
    compare_serie,
    compare_licence,
];

/// Order two entrants by the ranking chain (better entrant first).
pub fn compare_entrants(a: &EntrantTotals, b: &EntrantTotals) -> Ordering {
    RANK_CRITERIA
        .iter()
        .map(|cmp| cmp(a, b))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// How many of `entrants` go on to the final.
pub fn qualified_count(entrants: usize) -> usize {
    if entrants < LARGE_FIELD_THRESHOLD {
        4
    } else {
        6
    }
}

/// Rank entrants: match points, then moyenne, then best serie, all descending,
/// then licence ascending. Positions run 1..=n with no ties.
pub fn rank(mut totals: Vec<EntrantTotals>) -> Vec<RankedEntrant> {
    totals.sort_by(compare_entrants);
    let cutoff = qualified_count(totals.len());
    log::debug!("Ranked {} entrant(s), top {} qualify", totals.len(), cutoff.min(totals.len()));
    totals
        .into_iter()
        .enumerate()
        .map(|(idx, totals)| RankedEntrant {
            totals,
            rank_position: idx as u32 + 1,
            qualified: idx < cutoff,
        })
        .collect()
}
