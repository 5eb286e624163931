//! Results aggregation: fold a season's result rows into per-licence totals.

use crate::identity::IdentityResolver;
use crate::models::{
    EngineError, EntrantTotals, ResultRow, TournamentCalendar, TournamentPoints,
    TOURNAMENTS_PER_SEASON,
};
use std::collections::{BTreeMap, BTreeSet};

/// Running sums for one licence.
#[derive(Default)]
struct Accumulator<'a> {
    rows: Vec<&'a ResultRow>,
    match_points: u32,
    points: u32,
    reprises: u32,
    /// Points of rows that had at least one reprise (moyenne numerator).
    moyenne_points: u32,
    best_serie: u32,
}

fn checked_sum(total: u32, value: u32, licence: &str, what: &str) -> Result<u32, EngineError> {
    total
        .checked_add(value)
        .ok_or_else(|| EngineError::InvalidResultRow {
            licence: licence.to_string(),
            reason: format!("season total of {} overflows", what),
        })
}

/// Check a row before it is folded in. Returns its normalized licence.
fn validate_row(row: &ResultRow, identity: &dyn IdentityResolver) -> Result<String, EngineError> {
    if !(1..=TOURNAMENTS_PER_SEASON).contains(&row.tournament) {
        return Err(EngineError::InvalidTournamentNumber(row.tournament));
    }
    let licence = identity.normalize_licence(&row.licence);
    if licence.is_empty() {
        return Err(EngineError::InvalidResultRow {
            licence: row.licence.clone(),
            reason: "empty licence".to_string(),
        });
    }
    if !row.moyenne.is_finite() || row.moyenne < 0.0 {
        return Err(EngineError::InvalidResultRow {
            licence,
            reason: format!("moyenne {} is not a non-negative number", row.moyenne),
        });
    }
    Ok(licence)
}

/// Aggregate result rows of one category/season into totals, one per licence.
///
/// 1. Validate every row and normalize its licence; `(tournament, licence)` must be unique.
/// 2. Sum match points, points, and reprises; keep the best serie.
/// 3. Season moyenne = points / reprises over rows with at least one reprise
///    (0 when no reprise was played). Sums that overflow reject the run.
/// 4. Per tournament: `Played` when a row exists, `Absent` when the tournament was held
///    (in the calendar or present in the rows), `NotHeld` otherwise.
///
/// Output is sorted by licence. The function is pure: the same rows always give the same totals.
pub fn aggregate(
    rows: &[ResultRow],
    calendar: &TournamentCalendar,
    identity: &dyn IdentityResolver,
) -> Result<Vec<EntrantTotals>, EngineError> {
    let mut seen: BTreeSet<(u8, String)> = BTreeSet::new();
    let mut held: BTreeSet<u8> = calendar.held_tournaments().collect();
    let mut by_licence: BTreeMap<String, Accumulator> = BTreeMap::new();

    for row in rows {
        let licence = validate_row(row, identity)?;
        if !seen.insert((row.tournament, licence.clone())) {
            return Err(EngineError::DuplicateResult {
                tournament: row.tournament,
                licence,
            });
        }
        held.insert(row.tournament);

        let acc = by_licence.entry(licence.clone()).or_default();
        acc.match_points = checked_sum(acc.match_points, row.match_points, &licence, "match points")?;
        acc.points = checked_sum(acc.points, row.points, &licence, "points")?;
        acc.reprises = checked_sum(acc.reprises, row.reprises, &licence, "reprises")?;
        if row.reprises > 0 {
            acc.moyenne_points = checked_sum(acc.moyenne_points, row.points, &licence, "points")?;
        }
        acc.best_serie = acc.best_serie.max(row.serie);
        acc.rows.push(row);
    }

    let totals = by_licence
        .into_iter()
        .map(|(licence, mut acc)| {
            acc.rows.sort_by_key(|r| r.tournament);
            let mut totals = EntrantTotals::new(licence);
            totals.total_match_points = acc.match_points;
            totals.total_points = acc.points;
            totals.total_reprises = acc.reprises;
            totals.best_serie = acc.best_serie;
            totals.tournaments_played = acc.rows.len() as u32;
            totals.avg_moyenne = if acc.reprises > 0 {
                f64::from(acc.moyenne_points) / f64::from(acc.reprises)
            } else {
                0.0
            };

            // Sheet identity: latest tournament that spelled it out wins.
            if let Some(r) = acc.rows.iter().rev().find(|r| !r.player_name.trim().is_empty()) {
                totals.name = r.player_name.trim().to_string();
            }
            if let Some(club) = acc.rows.iter().rev().find_map(|r| r.club.as_deref()) {
                totals.club = Some(identity.club_display_name(club));
            }

            for (idx, slot) in totals.per_tournament.iter_mut().enumerate() {
                let tournament = idx as u8 + 1;
                *slot = match acc.rows.iter().find(|r| r.tournament == tournament) {
                    Some(r) => TournamentPoints::Played(r.match_points),
                    None if held.contains(&tournament) => TournamentPoints::Absent,
                    None => TournamentPoints::NotHeld,
                };
            }
            totals
        })
        .collect();

    Ok(totals)
}
