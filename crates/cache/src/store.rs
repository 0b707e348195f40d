//! The keyed TTL store.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CacheConfig;
use crate::entry::CacheEntry;

/// What to remove on invalidation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invalidation {
    /// Exactly this key.
    Key(String),
    /// Every key starting with this prefix.
    Prefix(String),
    /// Everything.
    All,
}

impl Invalidation {
    /// Parses the caller-facing form: nothing clears everything, a trailing
    /// `*` selects a prefix, anything else is an exact key.
    pub fn parse(target: Option<&str>) -> Self {
        match target.map(str::trim) {
            None | Some("") | Some("*") => Invalidation::All,
            Some(s) => match s.strip_suffix('*') {
                Some(prefix) => Invalidation::Prefix(prefix.to_string()),
                None => Invalidation::Key(s.to_string()),
            },
        }
    }
}

/// Hit/miss counters and current size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries that have not expired yet.
    pub live_entries: usize,
    pub enabled: bool,
}

/// Concurrent in-memory cache where every entry carries its own TTL.
///
/// Expired entries read as absent and are dropped lazily on access, by
/// [`sweep`](Self::sweep), or by the optional background sweeper. A disabled
/// cache never stores anything, so callers always recompute.
pub struct TtlCache<V> {
    entries: DashMap<String, CacheEntry<V>>,
    hits: AtomicU64,
    misses: AtomicU64,
    enabled: bool,
    default_ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(cfg: &CacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            enabled: cfg.enabled,
            default_ttl: cfg.default_ttl(),
        }
    }

    pub fn disabled() -> Self {
        Self::new(&CacheConfig::disabled())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Returns the stored value if present and not expired.
    pub fn get(&self, key: &str) -> Option<V> {
        if !self.enabled {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return None;
        }

        let now = Instant::now();
        // The shard guard must be released before any removal on the same key.
        let lookup = self.entries.get(key).map(|entry| {
            if entry.is_expired(now) {
                None
            } else {
                Some(entry.value.clone())
            }
        });

        match lookup {
            Some(Some(value)) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(value)
            }
            Some(None) => {
                self.entries.remove_if(key, |_, entry| entry.is_expired(now));
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Stores `value` under `key` for `ttl`, replacing any previous entry.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        if !self.enabled || ttl.is_zero() {
            return;
        }
        self.entries.insert(key.into(), CacheEntry::new(value, ttl));
    }

    /// [`set`](Self::set) with the configured default TTL.
    pub fn insert(&self, key: impl Into<String>, value: V) {
        self.set(key, value, self.default_ttl);
    }

    /// Cached value for `key`, or the result of `compute` stored for `ttl`.
    ///
    /// Errors are returned as-is and never cached.
    pub async fn get_or_try_insert_with<F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }
        let value = compute().await?;
        self.set(key, value.clone(), ttl);
        Ok(value)
    }

    /// Removes entries and returns how many were dropped.
    pub fn invalidate(&self, target: &Invalidation) -> usize {
        let removed = match target {
            Invalidation::Key(key) => usize::from(self.entries.remove(key).is_some()),
            Invalidation::Prefix(prefix) => {
                let mut removed = 0;
                self.entries.retain(|key, _| {
                    let matched = key.starts_with(prefix.as_str());
                    removed += usize::from(matched);
                    !matched
                });
                removed
            }
            Invalidation::All => {
                let removed = self.entries.len();
                self.entries.clear();
                removed
            }
        };
        debug!(?target, removed, "cache_invalidate");
        removed
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0;
        self.entries.retain(|_, entry| {
            let expired = entry.is_expired(now);
            removed += usize::from(expired);
            !expired
        });
        if removed > 0 {
            debug!(removed, "cache_sweep");
        }
        removed
    }

    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let live_entries = self
            .entries
            .iter()
            .filter(|entry| !entry.value().is_expired(now))
            .count();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            live_entries,
            enabled: self.enabled,
        }
    }

    /// Zeroes the hit/miss counters.
    pub fn reset_stats(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

impl<V: Clone + Send + Sync + 'static> TtlCache<V> {
    /// Sweeps expired entries every `interval` until the cache is dropped.
    ///
    /// Must be called from inside a Tokio runtime.
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> tokio::task::JoinHandle<()> {
        let weak: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                match weak.upgrade() {
                    Some(cache) => {
                        cache.sweep();
                    }
                    None => break,
                }
            }
        })
    }
}
