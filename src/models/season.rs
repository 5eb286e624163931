//! Season labels and the (category, season) key.

use crate::models::error::EngineError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Month (1-based) in which a new season starts.
pub const SEASON_START_MONTH: u32 = 9;

/// A sporting season, written `"2024-2025"`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Season {
    start_year: i32,
}

impl Season {
    pub fn new(start_year: i32) -> Self {
        Self { start_year }
    }

    /// The season a date falls in (seasons run September to August).
    pub fn containing(date: NaiveDate) -> Self {
        if date.month() >= SEASON_START_MONTH {
            Self::new(date.year())
        } else {
            Self::new(date.year() - 1)
        }
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_year, self.start_year + 1)
    }
}

impl FromStr for Season {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidSeason(s.to_string());
        let (first, second) = s.trim().split_once('-').ok_or_else(invalid)?;
        let first: i32 = first.parse().map_err(|_| invalid())?;
        let second: i32 = second.parse().map_err(|_| invalid())?;
        if second != first + 1 {
            return Err(invalid());
        }
        Ok(Self::new(first))
    }
}

impl TryFrom<String> for Season {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Season> for String {
    fn from(season: Season) -> Self {
        season.to_string()
    }
}

/// Identifies one ranking: a category (e.g. "LIBRE R2") in a season.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct SeasonKey {
    pub category: String,
    pub season: Season,
}

impl SeasonKey {
    pub fn new(category: impl Into<String>, season: Season) -> Self {
        Self {
            category: category.into(),
            season,
        }
    }
}

impl fmt::Display for SeasonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.category, self.season)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_starts_in_september() {
        let aug = NaiveDate::from_ymd_opt(2025, 8, 31).unwrap();
        let sep = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        assert_eq!(Season::containing(aug), Season::new(2024));
        assert_eq!(Season::containing(sep), Season::new(2025));
    }

    #[test]
    fn parse_and_display_round_trip() {
        let s: Season = "2024-2025".parse().unwrap();
        assert_eq!(s.start_year(), 2024);
        assert_eq!(s.to_string(), "2024-2025");
    }

    #[test]
    fn rejects_non_consecutive_years() {
        assert!(matches!(
            "2024-2026".parse::<Season>(),
            Err(EngineError::InvalidSeason(_))
        ));
        assert!("2024".parse::<Season>().is_err());
    }
}
