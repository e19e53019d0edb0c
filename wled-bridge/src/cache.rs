//! A bounded response cache with expiry.
//!
//! Accessory frameworks tend to fan out several characteristic reads
//! for one UI refresh, each of which would hit the same state
//! endpoint. The cache short-circuits those bursts: outcomes are
//! stored under the exact target URL and replayed -- failures
//! included -- until they expire. Capacity is bounded; beyond it the
//! least-recently-used entry is evicted.

use std::collections::HashMap;
use tokio::time::{Duration, Instant};
use wled_api::{transport::Response, Result};

pub const DEFAULT_CAPACITY: usize = 500;
pub const DEFAULT_TTL: Duration = Duration::from_millis(500);

struct Entry {
    value: Result<Response>,
    inserted: Instant,
    used: u64,
}

pub struct ResponseCache {
    capacity: usize,
    ttl: Duration,
    entries: HashMap<String, Entry>,

    // Monotonic counter stamped on every access; the entry with the
    // smallest stamp is the eviction victim.
    clock: u64,
}

impl ResponseCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        ResponseCache {
            capacity: capacity.max(1),
            ttl,
            entries: HashMap::new(),
            clock: 0,
        }
    }

    /// Returns the stored outcome for `key`, if present and not yet
    /// expired. An expired entry is treated as absent and removed. A
    /// hit refreshes the entry's recency.

    pub fn get(&mut self, key: &str) -> Option<Result<Response>> {
        let now = Instant::now();

        if let Some(entry) = self.entries.get_mut(key) {
            if now.duration_since(entry.inserted) < self.ttl {
                self.clock += 1;
                entry.used = self.clock;
                return Some(entry.value.clone());
            }
            self.entries.remove(key);
        }
        None
    }

    /// Stores an outcome under `key`, overwriting any previous entry
    /// and evicting the least-recently-used one if the cache is full.

    pub fn put(&mut self, key: String, value: Result<Response>) {
        if !self.entries.contains_key(&key)
            && self.entries.len() >= self.capacity
        {
            let victim = self
                .entries
                .iter()
                .min_by_key(|(_, e)| e.used)
                .map(|(k, _)| k.clone());

            if let Some(victim) = victim {
                self.entries.remove(&victim);
            }
        }

        self.clock += 1;
        self.entries.insert(
            key,
            Entry {
                value,
                inserted: Instant::now(),
                used: self.clock,
            },
        );
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        ResponseCache::new(DEFAULT_CAPACITY, DEFAULT_TTL)
    }
}
