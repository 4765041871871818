//! Cache Store Module
//!
//! Main cache engine: a HashMap behind a single reader/writer lock, with lazy
//! expiration on reads and a bulk sweep for entries nobody reads.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::trace;

use crate::cache::stats::StatsRecorder;
use crate::cache::{CacheEntry, CacheStats};
use crate::error::Result;

// == Cache Store ==
/// Thread-safe key-value storage with optional per-entry TTL.
///
/// Values are opaque to the store; `get` hands back a clone of exactly what was
/// stored. Share it between callers as `Arc<CacheStore<V>>`.
#[derive(Debug)]
pub struct CacheStore<V = Value> {
    /// Key-value storage
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    /// Performance statistics
    stats: StatsRecorder,
}

impl<V> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            stats: StatsRecorder::default(),
        }
    }

    // Every mutation leaves the map consistent, so a poisoned lock is still
    // safe to use.
    fn read_entries(&self) -> RwLockReadGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    // == Set ==
    /// Stores a value that never expires.
    ///
    /// Overwrites any existing entry, dropping its TTL along with it.
    pub fn set(&self, key: impl Into<String>, value: V) -> Result<()> {
        self.insert(key.into(), CacheEntry::new(value))
    }

    // == Set With TTL ==
    /// Stores a value that expires `ttl` from now.
    ///
    /// A zero `ttl` behaves exactly like [`CacheStore::set`].
    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) -> Result<()> {
        self.insert(key.into(), CacheEntry::with_ttl(value, ttl))
    }

    fn insert(&self, key: String, entry: CacheEntry<V>) -> Result<()> {
        // The entry is fully built before the lock is taken, so readers see
        // either the old entry or the new one.
        self.write_entries().insert(key, entry);
        Ok(())
    }

    // == Delete ==
    /// Removes an entry, reporting whether it was present.
    ///
    /// An expired-but-unswept entry still counts as present here.
    pub fn delete(&self, key: &str) -> bool {
        self.write_entries().remove(key).is_some()
    }

    // == Contains ==
    /// Returns true if the key holds a live entry.
    ///
    /// Read-only: an expired entry is reported absent but left for `get` or the
    /// sweep to reclaim.
    pub fn contains_key(&self, key: &str) -> bool {
        let entries = self.read_entries();
        let now = Instant::now();
        entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired_at(now))
    }

    // == Keys ==
    /// Returns every live key, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        let entries = self.read_entries();
        let now = Instant::now();
        entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Holds the write lock for the whole scan. Returns the number of entries
    /// removed.
    pub fn cleanup_expired(&self) -> usize {
        let mut entries = self.write_entries();
        let now = Instant::now();

        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - entries.len();

        self.stats.record_expirations(removed);
        removed
    }

    // == Clear ==
    /// Removes every entry, returning how many were stored.
    pub fn clear(&self) -> usize {
        let mut entries = self.write_entries();
        let removed = entries.len();
        entries.clear();
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.len())
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones the sweep
    /// has not reached yet.
    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.read_entries().is_empty()
    }
}

impl<V: Clone> CacheStore<V> {
    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns None if the key is absent or expired. An expired entry is
    /// removed on the way out.
    pub fn get(&self, key: &str) -> Option<V> {
        self.get_with_ttl(key).map(|(value, _)| value)
    }

    /// Retrieves a value together with its remaining lifetime.
    ///
    /// The lifetime is None for entries that never expire.
    pub fn get_with_ttl(&self, key: &str) -> Option<(V, Option<Duration>)> {
        // Expiry is judged at the moment the lock is held, not when the call
        // started, so waiting behind a writer never yields a stale value.
        let now = {
            let entries = self.read_entries();
            let now = Instant::now();
            match entries.get(key) {
                None => {
                    self.stats.record_miss();
                    return None;
                }
                Some(entry) if !entry.is_expired_at(now) => {
                    self.stats.record_hit();
                    return Some((entry.value.clone(), entry.ttl_remaining_at(now)));
                }
                Some(_) => now,
            }
        };

        self.stats.record_miss();
        self.remove_if_expired(key, now);
        None
    }

    // Another caller may have removed or replaced the entry between dropping
    // the read lock and taking the write lock, so expiry is checked again here.
    fn remove_if_expired(&self, key: &str, now: Instant) {
        let mut entries = self.write_entries();
        if entries.get(key).is_some_and(|entry| entry.is_expired_at(now)) {
            entries.remove(key);
            self.stats.record_expirations(1);
            trace!(key, "removed expired entry on read");
        }
    }
}
