// TTL cache for a loaded player pool.
//
// The engine itself is stateless; callers own one of these and decide when
// to reload. Time is passed in explicitly so expiry is testable without
// sleeping.

use std::time::{Duration, Instant};

use tracing::info;

use crate::player::PlayerRecord;

/// A player pool with an expiry clock. Stale entries are treated as absent,
/// never served.
#[derive(Debug, Clone)]
pub struct PoolCache {
    ttl: Duration,
    entry: Option<CachedPool>,
}

#[derive(Debug, Clone)]
struct CachedPool {
    players: Vec<PlayerRecord>,
    loaded_at: Instant,
}

impl PoolCache {
    pub fn new(ttl: Duration) -> Self {
        PoolCache { ttl, entry: None }
    }

    /// The cached pool, or `None` when empty or older than the TTL.
    pub fn get(&self, now: Instant) -> Option<&[PlayerRecord]> {
        let entry = self.entry.as_ref()?;
        if now.duration_since(entry.loaded_at) >= self.ttl {
            return None;
        }
        Some(&entry.players)
    }

    /// Replace the cached pool, restarting the expiry clock.
    pub fn refresh(&mut self, players: Vec<PlayerRecord>, now: Instant) {
        info!("caching player pool ({} players)", players.len());
        self.entry = Some(CachedPool {
            players,
            loaded_at: now,
        });
    }

    /// Drop the cached pool immediately.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
