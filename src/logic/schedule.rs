//! Match schedules per pool size: fixed brackets for 3, 4 and 5 players,
//! full round-robin otherwise.

use crate::models::{EngineError, Participant, PoolMatch};

/// Matches for a pool of `pool_size` players, in play order.
///
/// Slots are 1-based pool positions (slot 1 = best seed); the caller maps them to entrants.
/// Pools of 3, 4 and 5 use brackets where later matches depend on earlier results.
/// Every other size plays a full round-robin; sizes 0 and 1 have no matches.
pub fn schedule(pool_size: i64) -> Result<Vec<PoolMatch>, EngineError> {
    use Participant::{LoserOf, Slot, WinnerOf};

    if pool_size < 0 {
        return Err(EngineError::InvalidPoolSize(pool_size));
    }
    let matches = match pool_size {
        3 => vec![
            PoolMatch::fixed(1, 2, 3),
            PoolMatch::dynamic(2, Slot(1), LoserOf(1)),
            PoolMatch::dynamic(3, Slot(1), WinnerOf(1)),
        ],
        4 => vec![
            PoolMatch::fixed(1, 1, 4),
            PoolMatch::fixed(2, 2, 3),
            PoolMatch::dynamic(3, LoserOf(1), LoserOf(2)),
            PoolMatch::dynamic(4, WinnerOf(1), WinnerOf(2)),
        ],
        5 => vec![
            PoolMatch::fixed(1, 1, 5),
            PoolMatch::fixed(2, 2, 4),
            PoolMatch::dynamic(3, Slot(3), LoserOf(1)),
            PoolMatch::dynamic(4, Slot(3), LoserOf(2)),
            PoolMatch::dynamic(5, WinnerOf(1), WinnerOf(2)),
        ],
        n => round_robin(n as usize),
    };
    Ok(matches)
}

/// Every pair of slots exactly once, grouped in rounds (circle method) where no slot
/// plays twice in the same round.
fn round_robin(players: usize) -> Vec<PoolMatch> {
    if players < 2 {
        return Vec::new();
    }
    // None is the bye when the player count is odd.
    let mut ring: Vec<Option<usize>> = (1..=players).map(Some).collect();
    if players % 2 == 1 {
        ring.push(None);
    }
    let len = ring.len();

    let mut matches = Vec::with_capacity(players * (players - 1) / 2);
    for _round in 0..len - 1 {
        for i in 0..len / 2 {
            if let (Some(a), Some(b)) = (ring[i], ring[len - 1 - i]) {
                matches.push(PoolMatch::fixed(matches.len() + 1, a.min(b), a.max(b)));
            }
        }
        // Slot 1 stays put; everybody else rotates one place.
        if let Some(last) = ring.pop() {
            ring.insert(1, last);
        }
    }
    matches
}
