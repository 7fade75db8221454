//! Bounded in-process cache for query results.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::key::CacheKey;
use crate::status::CacheStatus;

#[derive(Debug)]
struct Entry<V> {
    value: V,
    inserted_at: Instant,
    /// Insertion sequence number; the smallest is evicted first.
    seq: u64,
}

#[derive(Debug)]
struct Inner<V> {
    entries: HashMap<CacheKey, Entry<V>>,
    next_seq: u64,
}

/// Hit and miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// TTL-expiring result cache shared between request handlers.
///
/// Values are cloned out on every hit, so store something cheap to clone
/// (typically an `Arc`). At capacity the oldest insertion is evicted.
/// A disabled cache stores nothing and reports [`CacheStatus::Bypass`].
#[derive(Debug)]
pub struct QueryCache<V> {
    inner: Mutex<Inner<V>>,
    ttl: Duration,
    max_entries: usize,
    enabled: bool,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V: Clone> QueryCache<V> {
    /// Create an enabled cache.
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                next_seq: 0,
            }),
            ttl,
            max_entries,
            enabled: max_entries > 0,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Create a cache that never stores anything.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO, 0)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fetch a live entry.
    pub fn get(&self, key: &CacheKey) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Store a value, evicting the oldest entry when full.
    pub fn insert(&self, key: CacheKey, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    /// Return the cached value for `key`, or compute and store it.
    ///
    /// Errors from `compute` are returned as-is and nothing is stored.
    pub fn get_or_try_insert_with<E, F>(&self, key: CacheKey, compute: F) -> Result<(V, CacheStatus), E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if !self.enabled {
            return compute().map(|v| (v, CacheStatus::Bypass));
        }

        if let Some(value) = self.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok((value, CacheStatus::Hit));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = compute()?;
        self.insert(key, value.clone());
        Ok((value, CacheStatus::Miss))
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    fn get_at(&self, key: &CacheKey, now: Instant) -> Option<V> {
        if !self.enabled {
            return None;
        }
        let mut inner = self.lock();
        let expired = match inner.entries.get(key) {
            None => return None,
            Some(entry) => now.saturating_duration_since(entry.inserted_at) >= self.ttl,
        };
        if expired {
            trace!(key = %key, "query cache entry expired");
            inner.entries.remove(key);
            return None;
        }
        inner.entries.get(key).map(|entry| entry.value.clone())
    }

    fn insert_at(&self, key: CacheKey, value: V, now: Instant) {
        if !self.enabled {
            return;
        }
        let mut inner = self.lock();

        if !inner.entries.contains_key(&key) && inner.entries.len() >= self.max_entries {
            // Expired entries go first; otherwise the oldest insertion.
            let ttl = self.ttl;
            inner
                .entries
                .retain(|_, e| now.saturating_duration_since(e.inserted_at) < ttl);
            if inner.entries.len() >= self.max_entries {
                let oldest = inner
                    .entries
                    .iter()
                    .min_by_key(|(_, e)| e.seq)
                    .map(|(k, _)| k.clone());
                if let Some(oldest) = oldest {
                    debug!(key = %oldest, "evicting query cache entry");
                    inner.entries.remove(&oldest);
                }
            }
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.entries.insert(
            key,
            Entry {
                value,
                inserted_at: now,
                seq,
            },
        );
    }

    fn lock(&self) -> MutexGuard<'_, Inner<V>> {
        // A panic while holding the lock cannot leave an entry half-written.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
