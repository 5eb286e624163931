//! Pool matches: fixed slot pairings and matches that depend on earlier results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of an earlier match a dynamic match depends on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Winner,
    Loser,
}

/// One side of a match. Slots are 1-based positions within the pool; match
/// references are 1-based play-order numbers within the same pool.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Participant {
    Slot(usize),
    WinnerOf(usize),
    LoserOf(usize),
}

impl Participant {
    /// The earlier match this participant comes from, if any.
    pub fn source(&self) -> Option<(usize, Outcome)> {
        match *self {
            Participant::Slot(_) => None,
            Participant::WinnerOf(m) => Some((m, Outcome::Winner)),
            Participant::LoserOf(m) => Some((m, Outcome::Loser)),
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Participant::Slot(s) => write!(f, "slot {}", s),
            Participant::WinnerOf(m) => write!(f, "winner of match {}", m),
            Participant::LoserOf(m) => write!(f, "loser of match {}", m),
        }
    }
}

/// Who plays a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fixture {
    /// Both players known at draw time.
    Static { slot_a: usize, slot_b: usize },
    /// At least one player is decided by an earlier match.
    Dynamic {
        first: Participant,
        second: Participant,
    },
}

impl Fixture {
    /// Earlier matches (and which side of them) this fixture waits on.
    pub fn depends_on(&self) -> Vec<(usize, Outcome)> {
        match self {
            Fixture::Static { .. } => Vec::new(),
            Fixture::Dynamic { first, second } => {
                first.source().into_iter().chain(second.source()).collect()
            }
        }
    }

    /// Human-readable description for schedules and convocations.
    pub fn describe(&self) -> String {
        match self {
            Fixture::Static { slot_a, slot_b } => format!("Slot {} vs slot {}", slot_a, slot_b),
            Fixture::Dynamic {
                first: Participant::WinnerOf(a),
                second: Participant::WinnerOf(b),
            } => format!("Winners of match {} and {}", a, b),
            Fixture::Dynamic {
                first: Participant::LoserOf(a),
                second: Participant::LoserOf(b),
            } => format!("Losers of match {} and {}", a, b),
            Fixture::Dynamic { first, second } => {
                let first = first.to_string();
                let mut chars = first.chars();
                let capitalized: String = match chars.next() {
                    Some(c) => c.to_uppercase().chain(chars).collect(),
                    None => first.clone(),
                };
                format!("{} vs {}", capitalized, second)
            }
        }
    }
}

/// A match of a pool, numbered in play order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PoolMatch {
    /// 1-based play order within the pool.
    pub number: usize,
    #[serde(flatten)]
    pub fixture: Fixture,
    pub description: String,
}

impl PoolMatch {
    pub fn new(number: usize, fixture: Fixture) -> Self {
        Self {
            number,
            fixture,
            description: fixture.describe(),
        }
    }

    pub fn fixed(number: usize, slot_a: usize, slot_b: usize) -> Self {
        Self::new(number, Fixture::Static { slot_a, slot_b })
    }

    pub fn dynamic(number: usize, first: Participant, second: Participant) -> Self {
        Self::new(number, Fixture::Dynamic { first, second })
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self.fixture, Fixture::Dynamic { .. })
    }

    /// Slot pair of a static match.
    pub fn slots(&self) -> Option<(usize, usize)> {
        match self.fixture {
            Fixture::Static { slot_a, slot_b } => Some((slot_a, slot_b)),
            Fixture::Dynamic { .. } => None,
        }
    }
}
