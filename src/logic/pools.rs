//! Pool allocation: seed registered entrants by season rank and deal them into pools.

use crate::identity::{IdentityResolver, PlayerDirectory};
use crate::models::{EngineError, Pool, PoolEntrant, RankedEntrant};
use std::collections::{HashMap, HashSet};

/// Preferred pool size; leftovers turn some pools into pools of four.
const PREFERRED_POOL_SIZE: usize = 3;
/// Up to this many entrants play in a single pool (the 4- and 5-player brackets).
const SINGLE_POOL_MAX: usize = 5;

/// Number of pools to use for `entrants` when the organizer does not pick one.
pub fn suggested_pool_count(entrants: usize) -> usize {
    match entrants {
        0 => 0,
        n if n <= SINGLE_POOL_MAX => 1,
        n => n / PREFERRED_POOL_SIZE,
    }
}

/// Order the licences registered for a tournament by season rank.
///
/// Ranked registrations come first, best rank first. Registrations with no season
/// history follow in registration order, flagged `is_new`. Licences are normalized,
/// and a licence registered twice is kept once.
pub fn seed_order(
    ranking: &[RankedEntrant],
    registrations: &[String],
    identity: &dyn IdentityResolver,
    directory: &dyn PlayerDirectory,
) -> Vec<PoolEntrant> {
    let by_licence: HashMap<&str, &RankedEntrant> =
        ranking.iter().map(|r| (r.licence(), r)).collect();

    let mut seen = HashSet::new();
    let mut ranked = Vec::new();
    let mut newcomers = Vec::new();
    for raw in registrations {
        let licence = identity.normalize_licence(raw);
        if licence.is_empty() || !seen.insert(licence.clone()) {
            continue;
        }
        match by_licence.get(licence.as_str()) {
            Some(r) => ranked.push(PoolEntrant::from(*r)),
            None => {
                let mut entrant = PoolEntrant::new_entrant(licence);
                if let Some(entry) = directory.find(&entrant.licence) {
                    entrant.name = entry.name;
                    entrant.club = entry.club.map(|c| identity.club_display_name(&c));
                }
                newcomers.push(entrant);
            }
        }
    }

    ranked.sort_by_key(|e| e.rank_position);
    if !newcomers.is_empty() {
        log::debug!("{} registration(s) without season ranking seeded last", newcomers.len());
    }
    ranked.extend(newcomers);
    ranked
}

/// Pool index (0-based) for the entrant at seed `position` (0-based): snake order,
/// left to right on even rows and right to left on odd rows.
pub fn serpentine_pool_index(position: usize, pool_count: usize) -> usize {
    let row = position / pool_count;
    let col = position % pool_count;
    if row % 2 == 0 {
        col
    } else {
        pool_count - 1 - col
    }
}

/// Deal seeded entrants into `pool_count` pools in serpentine order.
///
/// Pool sizes differ by at most one, and each pool keeps its entrants in seed order
/// (slot 1 is the pool's best seed). Fails without producing any pool when
/// `pool_count` is 0 or exceeds the number of entrants.
pub fn allocate_pools(seeds: &[PoolEntrant], pool_count: usize) -> Result<Vec<Pool>, EngineError> {
    if pool_count == 0 || pool_count > seeds.len() {
        return Err(EngineError::InvalidPoolCount {
            pool_count,
            entrants: seeds.len(),
        });
    }

    let mut pools: Vec<Pool> = (1..=pool_count).map(Pool::new).collect();
    for (position, entrant) in seeds.iter().enumerate() {
        pools[serpentine_pool_index(position, pool_count)]
            .entrants
            .push(entrant.clone());
    }
    Ok(pools)
}

/// Deal a season ranking (in rank order) into pools.
pub fn allocate(ranked: &[RankedEntrant], pool_count: usize) -> Result<Vec<Pool>, EngineError> {
    let seeds: Vec<PoolEntrant> = ranked.iter().map(PoolEntrant::from).collect();
    allocate_pools(&seeds, pool_count)
}
