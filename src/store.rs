//! Result storage seen by the engine: rows and calendar per (category, season).

use crate::models::{ResultRow, SeasonKey, TournamentCalendar};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Source of imported results. Implementations hide persistence entirely.
pub trait ResultStore {
    fn fetch_result_rows(&self, key: &SeasonKey) -> Vec<ResultRow>;

    fn calendar(&self, key: &SeasonKey) -> TournamentCalendar;
}

#[derive(Clone, Debug, Default)]
struct SeasonResults {
    rows: Vec<ResultRow>,
    calendar: TournamentCalendar,
}

/// In-memory store used by the web binary and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    seasons: HashMap<SeasonKey, SeasonResults>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all rows of one tournament and mark it held.
    pub fn import_tournament(
        &mut self,
        key: &SeasonKey,
        tournament: u8,
        held_on: Option<NaiveDate>,
        rows: Vec<ResultRow>,
    ) {
        let season = self.seasons.entry(key.clone()).or_default();
        season.rows.retain(|r| r.tournament != tournament);
        season
            .rows
            .extend(rows.into_iter().map(|r| ResultRow { tournament, ..r }));
        season.calendar.mark_held(tournament, held_on);
    }
}

impl ResultStore for MemoryStore {
    fn fetch_result_rows(&self, key: &SeasonKey) -> Vec<ResultRow> {
        self.seasons
            .get(key)
            .map(|s| s.rows.clone())
            .unwrap_or_default()
    }

    fn calendar(&self, key: &SeasonKey) -> TournamentCalendar {
        self.seasons
            .get(key)
            .map(|s| s.calendar.clone())
            .unwrap_or_default()
    }
}
