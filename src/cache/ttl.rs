use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

/// Default entry lifetime: five minutes.
const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// A stored value with its creation and expiry deadlines.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub data: V,
    pub created_at: Instant,
    pub expires_at: Instant,
}

/// Expiring key-value store with lazy eviction.
///
/// Entries are only checked for expiry when read; there is no background
/// sweep. An expired entry is deleted on the read that detects it.
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: HashMap<String, CacheEntry<V>>,
    default_ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    pub fn new() -> Self {
        Self::with_default_ttl(DEFAULT_TTL)
    }

    pub fn with_default_ttl(default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            default_ttl,
        }
    }

    /// Store `data` under `key` with the default TTL.
    pub fn set(&mut self, key: impl Into<String>, data: V) {
        let ttl = self.default_ttl;
        self.set_with_ttl(key, data, ttl);
    }

    /// Store `data` under `key`, expiring after `ttl`.
    pub fn set_with_ttl(&mut self, key: impl Into<String>, data: V, ttl: Duration) {
        let created_at = Instant::now();
        self.entries.insert(
            key.into(),
            CacheEntry {
                data,
                created_at,
                expires_at: created_at + ttl,
            },
        );
    }

    /// Read `key`, deleting and missing if the entry has expired.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let expired = self
            .entries
            .get(key)
            .is_some_and(|entry| Instant::now() > entry.expires_at);
        if expired {
            self.entries.remove(key);
            debug!(key, "evicted expired cache entry");
            return None;
        }
        self.entries.get(key).map(|entry| entry.data.clone())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
