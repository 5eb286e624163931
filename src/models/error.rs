//! Errors raised by the ranking and pool engine.

/// Errors that can occur while aggregating, ranking, or drawing pools.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineError {
    /// Pool count is zero or larger than the number of entrants.
    InvalidPoolCount { pool_count: usize, entrants: usize },
    /// Negative pool size passed to the scheduler.
    InvalidPoolSize(i64),
    /// Result row references a tournament outside 1..=3.
    InvalidTournamentNumber(u8),
    /// Result row failed validation (empty licence, negative or non-finite moyenne).
    InvalidResultRow { licence: String, reason: String },
    /// Two rows for the same licence in the same tournament.
    DuplicateResult { tournament: u8, licence: String },
    /// Season label is not of the form "2024-2025".
    InvalidSeason(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidPoolCount {
                pool_count,
                entrants,
            } => write!(
                f,
                "Cannot split {} entrant(s) into {} pool(s)",
                entrants, pool_count
            ),
            EngineError::InvalidPoolSize(size) => write!(f, "Invalid pool size {}", size),
            EngineError::InvalidTournamentNumber(n) => {
                write!(f, "Tournament number {} is outside the season (1-3)", n)
            }
            EngineError::InvalidResultRow { licence, reason } => {
                write!(f, "Invalid result for licence '{}': {}", licence, reason)
            }
            EngineError::DuplicateResult {
                tournament,
                licence,
            } => write!(
                f,
                "Licence {} has more than one result in tournament {}",
                licence, tournament
            ),
            EngineError::InvalidSeason(s) => write!(f, "Invalid season '{}' (expected e.g. 2024-2025)", s),
        }
    }
}

impl std::error::Error for EngineError {}
