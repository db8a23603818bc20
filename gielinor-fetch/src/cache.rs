//! TTL cache abstraction.
//!
//! Clients memoize validated upstream responses through the [`Cache`]
//! trait. Values are stored as [`serde_json::Value`] so a backend never
//! needs to know the payload type; the client re-validates on read.
//!
//! [`MemoryCache`] is the in-process reference backend. Expired entries
//! are evicted lazily when read; there is no background sweep.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Expiry used when `now + ttl` would overflow.
const FOREVER: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

// ============================================================================
// Cache Trait
// ============================================================================

/// Key-value store with per-entry expiry.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Returns the value stored under `key`, unless absent or expired.
    async fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key` for `ttl`. A zero TTL is never served.
    async fn set(&self, key: &str, value: Value, ttl: Duration);
}

/// Converts a millisecond TTL into a [`Duration`].
///
/// Negative and non-finite values become zero.
pub fn ttl_from_millis(ms: f64) -> Duration {
    if ms.is_finite() && ms > 0.0 {
        Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}

/// Joins the present parts of a cache key with `:`.
///
/// ```
/// use gielinor_fetch::build_cache_key;
///
/// assert_eq!(build_cache_key([Some("a"), None, Some("b"), Some("2")]), "a:b:2");
/// ```
pub fn build_cache_key<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let mut key = String::new();
    for part in parts.into_iter().flatten() {
        if !key.is_empty() {
            key.push(':');
        }
        key.push_str(part.as_ref());
    }
    key
}

// ============================================================================
// Memory Cache
// ============================================================================

/// A cached value and the instant it stops being served.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Stored value.
    pub value: Value,
    /// Expiry instant.
    pub expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// In-memory [`Cache`] backend.
///
/// Unbounded unless [`MemoryCache::with_max_entries`] is used. When the
/// bound is reached, expired entries are dropped first, then the entry that
/// would expire soonest.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    max_entries: Option<usize>,
}

impl MemoryCache {
    /// Creates an unbounded cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache holding at most `max_entries` keys.
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_entries: Some(max_entries.max(1)),
        }
    }

    /// Returns the number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Drops every expired entry and returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Removes every entry.
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    fn make_room(entries: &mut HashMap<String, CacheEntry>, max: usize, now: Instant) {
        entries.retain(|_, entry| !entry.is_expired(now));

        while entries.len() >= max {
            let Some(victim) = entries
                .iter()
                .min_by_key(|(_, entry)| entry.expires_at)
                .map(|(key, _)| key.clone())
            else {
                break;
            };
            debug!(key = %victim, "Evicting cache entry");
            entries.remove(&victim);
        }
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Option<Value> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        match entries.get(key) {
            Some(entry) if !entry.is_expired(now) => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    async fn set(&self, key: &str, value: Value, ttl: Duration) {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        if let Some(max) = self.max_entries {
            if !entries.contains_key(key) && entries.len() >= max {
                Self::make_room(&mut entries, max, now);
            }
        }

        let expires_at = now.checked_add(ttl).unwrap_or_else(|| now + FOREVER);
        entries.insert(key.to_string(), CacheEntry { value, expires_at });
    }
}

// ============================================================================
// Tests
// ============================================================================
