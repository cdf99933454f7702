// Bounded expiring response cache
//
// Fixed-capacity LRU keyed by the strings built in `cache::key`. Expiry is
// checked lazily at read time; there is no background sweep. Reads promote
// recency so the eviction victim is the least-recently-used key, not the
// least-recently-inserted one.

use crate::cache::models::{CacheConfig, CacheStats};
use crate::error::{AskError, Result};
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

struct CacheEntry {
    value: String,
    created_at: Instant,
}

struct Inner {
    entries: LruCache<String, CacheEntry>,
    stats: CacheStats,
}

/// In-memory LRU store for provider responses, with per-entry TTL.
pub struct ResponseCache {
    inner: Mutex<Inner>,
    ttl: Duration,
}

impl ResponseCache {
    /// Create a cache with the given capacity and TTL.
    ///
    /// A zero capacity is a configuration mistake, rejected here rather
    /// than surfacing as undefined behavior on `set`.
    pub fn new(config: CacheConfig) -> Result<Self> {
        let capacity = NonZeroUsize::new(config.capacity).ok_or_else(|| {
            AskError::Configuration("cache capacity must be at least 1".to_string())
        })?;
        Ok(Self {
            inner: Mutex::new(Inner {
                entries: LruCache::new(capacity),
                stats: CacheStats::default(),
            }),
            ttl: config.ttl,
        })
    }

    /// Look up a key. A live entry is promoted to most-recently-used and its
    /// value returned; an expired entry is removed and treated as absent.
    pub fn get(&self, key: &str) -> Option<String> {
        let inner = &mut *self.inner.lock();
        let expired = match inner.entries.get(key) {
            Some(entry) if entry.created_at.elapsed() <= self.ttl => {
                inner.stats.hits += 1;
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            inner.entries.pop(key);
            inner.stats.expirations += 1;
            debug!(key, "cache entry expired");
        }
        inner.stats.misses += 1;
        None
    }

    /// Insert or overwrite a key, stamping a fresh creation time and
    /// promoting it to most-recently-used. Inserting a fresh key at
    /// capacity evicts the least-recently-used entry first.
    pub fn set(&self, key: String, value: String) {
        let inner = &mut *self.inner.lock();
        let entry = CacheEntry {
            value,
            created_at: Instant::now(),
        };
        if let Some((displaced, _)) = inner.entries.push(key.clone(), entry) {
            // push returns the old value when overwriting the same key;
            // only a different key counts as an eviction.
            if displaced != key {
                inner.stats.evictions += 1;
                debug!(key = %displaced, "evicted least-recently-used entry");
            }
        }
    }

    /// Drop every entry unconditionally. Stats are preserved.
    pub fn clear(&self) {
        self.inner.lock().entries.clear();
        debug!("cache cleared");
    }

    /// Number of entries currently held, expired or not.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the hit/miss/eviction/expiration counters.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats.clone()
    }
}
