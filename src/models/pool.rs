//! Pools of entrants and their drawn match lists.

use crate::models::entrant::RankedEntrant;
use crate::models::game::PoolMatch;
use serde::{Deserialize, Serialize};

/// An entrant as seeded into a pool draw.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PoolEntrant {
    pub licence: String,
    pub name: String,
    pub club: Option<String>,
    /// Season rank; `None` for entrants without season history.
    pub rank_position: Option<u32>,
    pub is_new: bool,
}

impl PoolEntrant {
    /// Entrant not present in the season ranking.
    pub fn new_entrant(licence: impl Into<String>) -> Self {
        Self {
            licence: licence.into(),
            name: String::new(),
            club: None,
            rank_position: None,
            is_new: true,
        }
    }
}

impl From<&RankedEntrant> for PoolEntrant {
    fn from(r: &RankedEntrant) -> Self {
        Self {
            licence: r.totals.licence.clone(),
            name: r.totals.name.clone(),
            club: r.totals.club.clone(),
            rank_position: Some(r.rank_position),
            is_new: false,
        }
    }
}

/// A pool: its entrants in seed order (slot 1 is the top seed).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    /// 1-based pool number.
    pub number: usize,
    pub entrants: Vec<PoolEntrant>,
}

impl Pool {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            entrants: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entrants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrants.is_empty()
    }

    /// Letter used on printed schedules (pool 1 = "A").
    pub fn letter(&self) -> String {
        let mut n = self.number;
        let mut out = Vec::new();
        while n > 0 {
            let rem = (n - 1) % 26;
            out.push(char::from(b'A' + rem as u8));
            n = (n - 1) / 26;
        }
        out.iter().rev().collect()
    }

    /// Entrant at a 1-based slot.
    pub fn slot(&self, slot: usize) -> Option<&PoolEntrant> {
        slot.checked_sub(1).and_then(|i| self.entrants.get(i))
    }
}

/// A pool with its scheduled matches.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PoolDraw {
    #[serde(flatten)]
    pub pool: Pool,
    pub matches: Vec<PoolMatch>,
}
