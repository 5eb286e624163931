//! Engine logic: aggregation, ranking, pool allocation, match scheduling.

mod aggregate;
mod pools;
mod ranking;
mod schedule;
mod season;

pub use aggregate::aggregate;
pub use pools::{allocate, allocate_pools, seed_order, serpentine_pool_index, suggested_pool_count};
pub use ranking::{compare_entrants, qualified_count, rank, LARGE_FIELD_THRESHOLD};
pub use schedule::schedule;
pub use season::{compute_ranking, compute_season_ranking, draw_pools};
