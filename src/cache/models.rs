//! Cache configuration and statistics models.

use std::time::Duration;

/// Configuration for the bounded expiring response cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries held at once. Must be at least 1;
    /// [`ResponseCache::new`](crate::cache::ResponseCache::new) rejects a
    /// zero capacity at construction.
    pub capacity: usize,
    /// How long an entry stays servable after insertion.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    /// Defaults mirror the reference pipeline: 100 entries, 1 hour TTL.
    fn default() -> Self {
        Self {
            capacity: 100,
            ttl: Duration::from_secs(3600),
        }
    }
}

/// Counters for cache behavior, readable at any time.
#[derive(Debug, Default, Clone)]
pub struct CacheStats {
    /// Lookups answered from a live entry.
    pub hits: u64,
    /// Lookups that found nothing servable.
    pub misses: u64,
    /// Entries dropped to make room for a new key.
    pub evictions: u64,
    /// Entries dropped because their TTL had elapsed when read.
    pub expirations: u64,
}
