//! Imported tournament result rows and the per-season tournament calendar.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of qualifying tournaments in a season.
pub const TOURNAMENTS_PER_SEASON: u8 = 3;

/// One entrant's line on a tournament result sheet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Tournament sequence number within the season (1..=3).
    pub tournament: u8,
    pub licence: String,
    /// Name as written on the result sheet (fallback when the licence is unknown).
    #[serde(default)]
    pub player_name: String,
    #[serde(default)]
    pub club: Option<String>,
    pub match_points: u32,
    /// Moyenne of this tournament, as printed. The season average is recomputed from points/reprises.
    pub moyenne: f64,
    pub serie: u32,
    pub points: u32,
    pub reprises: u32,
}

impl ResultRow {
    /// Convenience constructor for a row with no sheet name or club.
    pub fn new(
        tournament: u8,
        licence: impl Into<String>,
        match_points: u32,
        points: u32,
        reprises: u32,
        serie: u32,
    ) -> Self {
        let moyenne = if reprises > 0 {
            points as f64 / reprises as f64
        } else {
            0.0
        };
        Self {
            tournament,
            licence: licence.into(),
            player_name: String::new(),
            club: None,
            match_points,
            moyenne,
            serie,
            points,
            reprises,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = name.into();
        self
    }

    pub fn with_club(mut self, club: impl Into<String>) -> Self {
        self.club = Some(club.into());
        self
    }
}

/// Match points of one entrant for one tournament slot of the season.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "match_points", rename_all = "snake_case")]
pub enum TournamentPoints {
    Played(u32),
    /// The tournament was held but the entrant has no result in it.
    Absent,
    /// The tournament has not taken place yet.
    NotHeld,
}

/// Which tournaments of a season have been held, with their date when known.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentCalendar {
    held: BTreeMap<u8, Option<NaiveDate>>,
}

impl TournamentCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calendar where the given tournament numbers are held (no dates).
    pub fn with_held(tournaments: impl IntoIterator<Item = u8>) -> Self {
        let mut calendar = Self::new();
        for t in tournaments {
            calendar.mark_held(t, None);
        }
        calendar
    }

    /// Record a tournament as held. A known date is never overwritten by `None`.
    pub fn mark_held(&mut self, tournament: u8, date: Option<NaiveDate>) {
        let entry = self.held.entry(tournament).or_insert(None);
        if date.is_some() {
            *entry = date;
        }
    }

    pub fn is_held(&self, tournament: u8) -> bool {
        self.held.contains_key(&tournament)
    }

    pub fn held_on(&self, tournament: u8) -> Option<NaiveDate> {
        self.held.get(&tournament).copied().flatten()
    }

    /// Held tournament numbers in ascending order.
    pub fn held_tournaments(&self) -> impl Iterator<Item = u8> + '_ {
        self.held.keys().copied()
    }
}
