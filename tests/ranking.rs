//! Integration tests for season ranking and qualification.

use season_ranking::{
    compute_ranking, qualified_count, rank, AliasTable, DirectoryEntry, EntrantTotals, ResultRow,
    TournamentCalendar,
};
use std::collections::HashMap;

fn entrant(licence: &str, match_points: u32, moyenne: f64, serie: u32) -> EntrantTotals {
    let mut t = EntrantTotals::new(licence);
    t.total_match_points = match_points;
    t.avg_moyenne = moyenne;
    t.best_serie = serie;
    t
}

fn licences(ranked: &[season_ranking::RankedEntrant]) -> Vec<&str> {
    ranked.iter().map(|r| r.licence()).collect()
}

#[test]
fn match_points_come_first() {
    let ranked = rank(vec![
        entrant("A", 4, 9.0, 50),
        entrant("B", 8, 1.0, 1),
        entrant("C", 6, 5.0, 10),
    ]);
    assert_eq!(licences(&ranked), ["B", "C", "A"]);
    let positions: Vec<u32> = ranked.iter().map(|r| r.rank_position).collect();
    assert_eq!(positions, [1, 2, 3]);
}

#[test]
fn moyenne_then_serie_break_ties() {
    let ranked = rank(vec![
        entrant("A", 6, 2.0, 5),
        entrant("B", 6, 2.5, 1),
        entrant("C", 6, 2.0, 9),
    ]);
    assert_eq!(licences(&ranked), ["B", "C", "A"]);
}

#[test]
fn full_ties_get_distinct_positions_by_licence() {
    let ranked = rank(vec![
        entrant("Z9", 6, 2.0, 5),
        entrant("A1", 6, 2.0, 5),
        entrant("M5", 6, 2.0, 5),
    ]);
    assert_eq!(licences(&ranked), ["A1", "M5", "Z9"]);
    let positions: Vec<u32> = ranked.iter().map(|r| r.rank_position).collect();
    assert_eq!(positions, [1, 2, 3]);
}

#[test]
fn qualification_threshold() {
    assert_eq!(qualified_count(0), 4);
    assert_eq!(qualified_count(8), 4);
    assert_eq!(qualified_count(9), 6);
    assert_eq!(qualified_count(20), 6);
}

#[test]
fn top_entrants_are_flagged_qualified() {
    let small: Vec<_> = (0..8).map(|i| entrant(&format!("L{i}"), 20 - i, 1.0, 1)).collect();
    let ranked = rank(small);
    assert_eq!(ranked.iter().filter(|r| r.qualified).count(), 4);
    assert!(ranked[..4].iter().all(|r| r.qualified));

    let large: Vec<_> = (0..9).map(|i| entrant(&format!("L{i}"), 20 - i, 1.0, 1)).collect();
    let ranked = rank(large);
    assert_eq!(ranked.iter().filter(|r| r.qualified).count(), 6);
    assert!(!ranked[6].qualified);
}

#[test]
fn small_field_all_qualify() {
    let ranked = rank(vec![entrant("A", 1, 1.0, 1), entrant("B", 2, 1.0, 1)]);
    assert!(ranked.iter().all(|r| r.qualified));
}

#[test]
fn empty_totals_rank_to_empty_list() {
    assert!(rank(Vec::new()).is_empty());
}

#[test]
fn recomputing_unchanged_results_is_identical() {
    let rows = vec![
        ResultRow::new(1, "L1", 6, 60, 30, 8),
        ResultRow::new(1, "L2", 6, 60, 30, 8),
        ResultRow::new(1, "L3", 2, 33, 30, 4),
        ResultRow::new(2, "L3", 6, 50, 25, 7),
        ResultRow::new(2, "L1", 0, 20, 25, 3),
    ];
    let calendar = TournamentCalendar::with_held([1, 2]);
    let directory: HashMap<String, DirectoryEntry> = HashMap::new();
    let first = compute_ranking(&rows, &calendar, &AliasTable::new(), &directory).unwrap();
    let second = compute_ranking(&rows, &calendar, &AliasTable::new(), &directory).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
