//! Response cache collaborator.
//!
//! Bindings consult a [`Cache`] for read operations and populate it after a
//! successful response. Implementations must be safe to share across
//! concurrent invocations.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::trace;

/// Per-entry options forwarded to [`Cache::put`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheOptions {
    /// How long the entry stays valid. `None` keeps it until removed.
    pub ttl: Option<Duration>,
}

impl CacheOptions {
    /// Options with a time-to-live.
    pub fn ttl(ttl: Duration) -> Self {
        Self { ttl: Some(ttl) }
    }
}

/// A key/value store for decoded response payloads, keyed by composed URL.
pub trait Cache: Send + Sync + Debug {
    /// Returns the entry stored under `key`, if any.
    fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key`.
    fn put(&self, key: &str, value: Value, options: &CacheOptions);

    /// Removes the entry stored under `key`.
    fn remove(&self, key: &str);
}

#[derive(Debug)]
struct Entry {
    value: Value,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Thread-safe in-memory cache honouring [`CacheOptions::ttl`].
///
/// Expired entries are treated as absent and evicted when read.
///
/// ## Examples
///
/// ```
/// use apibind_runtime::{Cache, CacheOptions, MemoryCache};
/// use serde_json::json;
///
/// let cache = MemoryCache::new();
/// cache.put("https://api.example.com/items", json!([1, 2]), &CacheOptions::default());
/// assert_eq!(cache.get("https://api.example.com/items"), Some(json!([1, 2])));
/// ```
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included until they are read.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry>> {
        // A panic while holding the lock cannot leave an entry half-written.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.lock();
        let expired = entries.get(key)?.is_expired(Instant::now());
        if expired {
            trace!(key, "evicting expired cache entry");
            entries.remove(key);
            return None;
        }
        entries.get(key).map(|e| e.value.clone())
    }

    fn put(&self, key: &str, value: Value, options: &CacheOptions) {
        let expires_at = options.ttl.map(|ttl| Instant::now() + ttl);
        self.lock()
            .insert(key.to_string(), Entry { value, expires_at });
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }
}
