//! Keyed cache for query results.
//!
//! The carousel never talks to a global cache; it is handed a
//! [`QueryCache`] so tests can inspect or pre-populate it.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use tracing::debug;

/// Identifies a cached query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Users,
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::Users => write!(f, "users"),
        }
    }
}

/// get/set/invalidate contract of the cache layer.
///
/// `invalidate` marks an entry stale but keeps its value readable, so a
/// view can keep showing old data while a refetch is in flight.
pub trait QueryCache<V>: Send + Sync {
    fn get(&self, key: QueryKey) -> Option<V>;
    fn set(&self, key: QueryKey, value: V);
    fn invalidate(&self, key: QueryKey);
    fn is_stale(&self, key: QueryKey) -> bool;
}

#[derive(Debug)]
struct CacheEntry<V> {
    value: V,
    stale: bool,
    updated_at: Instant,
}

/// Process-local [`QueryCache`].
#[derive(Debug)]
pub struct MemoryQueryCache<V> {
    entries: Mutex<HashMap<QueryKey, CacheEntry<V>>>,
}

impl<V> Default for MemoryQueryCache<V> {
    fn default() -> Self {
        Self { entries: Mutex::new(HashMap::new()) }
    }
}

impl<V> MemoryQueryCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<QueryKey, CacheEntry<V>>> {
        // Entries are plain values; a panic mid-update cannot leave one half-written.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V: Clone + Send> QueryCache<V> for MemoryQueryCache<V> {
    fn get(&self, key: QueryKey) -> Option<V> {
        self.entries().get(&key).map(|entry| entry.value.clone())
    }

    fn set(&self, key: QueryKey, value: V) {
        debug!(%key, "Cache set");
        self.entries().insert(key, CacheEntry { value, stale: false, updated_at: Instant::now() });
    }

    fn invalidate(&self, key: QueryKey) {
        if let Some(entry) = self.entries().get_mut(&key) {
            debug!(%key, age_ms = entry.updated_at.elapsed().as_millis() as u64, "Cache invalidated");
            entry.stale = true;
        }
    }

    /// Missing entries count as stale.
    fn is_stale(&self, key: QueryKey) -> bool {
        self.entries().get(&key).map_or(true, |entry| entry.stale)
    }
}
