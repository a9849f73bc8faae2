//! In-memory expiring store.

use crate::backend::ExpiringStore;
use crate::error::StoreResult;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Writes between two full sweeps of expired entries.
pub const DEFAULT_SWEEP_INTERVAL: u64 = 256;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// An in-memory expiring store.
///
/// Entries carry an explicit expiry instant. A read that finds an expired
/// entry removes it, and every `sweep_interval`-th write sweeps the whole
/// map, so keys that are never read again (one-off server IDs, abandoned
/// tokens) do not accumulate. [`MemoryStore::purge_expired`] sweeps on demand.
///
/// Suitable for:
/// - Unit and integration tests
/// - Single-process deployments where tokens need not survive a restart
///
/// # Thread Safety
///
/// This store is thread-safe and can be shared across threads behind an `Arc`.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use ygg_store::{ExpiringStore, MemoryStore};
///
/// let store = MemoryStore::new();
/// store.set("server-1", "token", Some(Duration::from_secs(30))).unwrap();
/// assert!(store.has("server-1").unwrap());
/// store.del("server-1").unwrap();
/// assert!(!store.has("server-1").unwrap());
/// ```
#[derive(Debug)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
    writes: AtomicU64,
    sweep_interval: u64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_sweep_interval(DEFAULT_SWEEP_INTERVAL)
    }
}

impl MemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that sweeps expired entries every `interval` writes.
    ///
    /// An interval of zero is treated as one.
    #[must_use]
    pub fn with_sweep_interval(interval: u64) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            writes: AtomicU64::new(0),
            sweep_interval: interval.max(1),
        }
    }

    /// Returns the number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    /// Returns true if no live entries remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every expired entry and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    fn lookup(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        {
            let entries = self.entries.read();
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired(now) => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }

        // Re-check under the write lock; a concurrent `set` may have refreshed it.
        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
        }
        None
    }
}

impl ExpiringStore for MemoryStore {
    fn has(&self, key: &str) -> StoreResult<bool> {
        Ok(self.lookup(key).is_some())
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.lookup(key))
    }

    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> StoreResult<()> {
        let now = Instant::now();
        let expires_at = ttl.and_then(|ttl| now.checked_add(ttl));
        let mut entries = self.entries.write();
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );

        let writes = self.writes.fetch_add(1, Ordering::Relaxed) + 1;
        if writes % self.sweep_interval == 0 {
            entries.retain(|_, entry| !entry.is_expired(now));
        }
        Ok(())
    }

    fn del(&self, key: &str) -> StoreResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        self.entries.write().clear();
        Ok(())
    }

    fn clear_prefix(&self, prefix: &str) -> StoreResult<()> {
        self.entries.write().retain(|key, _| !key.starts_with(prefix));
        Ok(())
    }
}
