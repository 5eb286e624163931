//! Season pipeline: results → totals → ranking, and seeds → pools → matches.

use crate::identity::{IdentityResolver, PlayerDirectory};
use crate::logic::aggregate::aggregate;
use crate::logic::pools::allocate_pools;
use crate::logic::ranking::rank;
use crate::logic::schedule::schedule;
use crate::models::{
    EngineError, PoolDraw, PoolEntrant, RankedEntrant, ResultRow, SeasonKey, TournamentCalendar,
};
use crate::store::ResultStore;

/// Recompute a full season ranking from its result rows.
///
/// Names and clubs come from the player directory; licences it does not know keep the
/// sheet's name and club and are flagged `missing_from_directory`.
pub fn compute_ranking(
    rows: &[ResultRow],
    calendar: &TournamentCalendar,
    identity: &dyn IdentityResolver,
    directory: &dyn PlayerDirectory,
) -> Result<Vec<RankedEntrant>, EngineError> {
    let mut totals = aggregate(rows, calendar, identity)?;
    for t in &mut totals {
        match directory.find(&t.licence) {
            Some(entry) => {
                t.name = entry.name;
                if let Some(club) = entry.club {
                    t.club = Some(identity.club_display_name(&club));
                }
            }
            None => {
                log::warn!(
                    "Licence {} ({}) is not in the player directory",
                    t.licence,
                    if t.name.is_empty() { "no name" } else { t.name.as_str() }
                );
                t.missing_from_directory = true;
            }
        }
    }
    Ok(rank(totals))
}

/// Fetch a season's rows and calendar from the store and rank it.
///
/// The caller must not import results for `key` while this runs.
pub fn compute_season_ranking(
    store: &dyn ResultStore,
    key: &SeasonKey,
    identity: &dyn IdentityResolver,
    directory: &dyn PlayerDirectory,
) -> Result<Vec<RankedEntrant>, EngineError> {
    let rows = store.fetch_result_rows(key);
    let calendar = store.calendar(key);
    log::debug!("Recomputing ranking for {} from {} row(s)", key, rows.len());
    compute_ranking(&rows, &calendar, identity, directory)
}

/// Allocate seeded entrants into pools and schedule every pool.
/// Any failure aborts the whole draw.
pub fn draw_pools(seeds: &[PoolEntrant], pool_count: usize) -> Result<Vec<PoolDraw>, EngineError> {
    let pools = allocate_pools(seeds, pool_count)?;
    let draws = pools
        .into_iter()
        .map(|pool| -> Result<PoolDraw, EngineError> {
            let matches = schedule(pool.len() as i64)?;
            Ok(PoolDraw { pool, matches })
        })
        .collect::<Result<Vec<_>, EngineError>>()?;
    log::debug!("Drew {} pool(s) for {} entrant(s)", draws.len(), seeds.len());
    Ok(draws)
}
