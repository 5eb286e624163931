//! Season ranking engine: aggregate tournament results, rank entrants, and draw
//! balanced pools with their match brackets.

pub mod identity;
pub mod logic;
pub mod models;
pub mod store;

pub use identity::{normalize_licence, AliasTable, IdentityResolver, PlayerDirectory};
pub use logic::{
    aggregate, allocate, allocate_pools, compute_ranking, compute_season_ranking, draw_pools,
    qualified_count, rank, schedule, seed_order, suggested_pool_count,
};
pub use models::{
    DirectoryEntry, EngineError, EntrantTotals, Fixture, Outcome, Participant, Pool, PoolDraw,
    PoolEntrant, PoolMatch, RankedEntrant, ResultRow, Season, SeasonKey, TournamentCalendar,
    TournamentPoints, TOURNAMENTS_PER_SEASON,
};
pub use store::{MemoryStore, ResultStore};
