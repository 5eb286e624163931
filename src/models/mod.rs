//! Data structures for season rankings: result rows, entrant totals, pools, and matches.

mod entrant;
mod error;
mod game;
mod pool;
mod result;
mod season;

pub use entrant::{DirectoryEntry, EntrantTotals, RankedEntrant};
pub use error::EngineError;
pub use game::{Fixture, Outcome, Participant, PoolMatch};
pub use pool::{Pool, PoolDraw, PoolEntrant};
pub use result::{ResultRow, TournamentCalendar, TournamentPoints, TOURNAMENTS_PER_SEASON};
pub use season::{Season, SeasonKey, SEASON_START_MONTH};
