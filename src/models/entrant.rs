//! Season totals per entrant and their ranked view.

use crate::models::result::{TournamentPoints, TOURNAMENTS_PER_SEASON};
use serde::{Deserialize, Serialize};

/// Cumulative season results of one licence in one category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntrantTotals {
    pub licence: String,
    pub name: String,
    pub club: Option<String>,
    pub total_match_points: u32,
    /// Average over all reprises played in the season; 0 when no reprise was played.
    pub avg_moyenne: f64,
    pub best_serie: u32,
    pub total_points: u32,
    pub total_reprises: u32,
    pub tournaments_played: u32,
    /// Match points for tournaments 1, 2 and 3.
    pub per_tournament: [TournamentPoints; TOURNAMENTS_PER_SEASON as usize],
    /// Licence not found in the player directory; name and club come from the result sheet.
    pub missing_from_directory: bool,
}

impl EntrantTotals {
    /// Empty totals for a licence (every tournament `NotHeld`).
    pub fn new(licence: impl Into<String>) -> Self {
        Self {
            licence: licence.into(),
            name: String::new(),
            club: None,
            total_match_points: 0,
            avg_moyenne: 0.0,
            best_serie: 0,
            total_points: 0,
            total_reprises: 0,
            tournaments_played: 0,
            per_tournament: [TournamentPoints::NotHeld; TOURNAMENTS_PER_SEASON as usize],
            missing_from_directory: false,
        }
    }

    /// Match points of tournament `n` (1-based).
    pub fn tournament(&self, n: u8) -> Option<TournamentPoints> {
        let idx = usize::from(n).checked_sub(1)?;
        self.per_tournament.get(idx).copied()
    }
}

/// An entrant with its season rank. Ranks are dense and never shared.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedEntrant {
    #[serde(flatten)]
    pub totals: EntrantTotals,
    pub rank_position: u32,
    /// Among the top entrants who go on to the final.
    pub qualified: bool,
}

impl RankedEntrant {
    pub fn licence(&self) -> &str {
        &self.totals.licence
    }
}

/// What the player directory knows about a licence.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub club: Option<String>,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>, club: Option<String>) -> Self {
        Self {
            name: name.into(),
            club,
        }
    }
}
