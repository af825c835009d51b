//! TTL cache backed by a concurrent map.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::broadcast;
use tokio::time::{self, Instant};

use crate::observability::metrics;

/// Longest TTL an entry can get (100 years). Effectively never expires.
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// A stored value and the instant it stops being visible.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    /// An entry is visible only while `now < expires_at`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// A thread-safe cache whose entries expire after a per-entry TTL.
///
/// Cloning is cheap and yields a handle to the same storage. There is no
/// capacity bound; entries only leave through expiry or [`TtlCache::remove`].
#[derive(Debug)]
pub struct TtlCache<K, V>
where
    K: Eq + Hash,
{
    inner: Arc<DashMap<K, CacheEntry<V>>>,
}

impl<K, V> Clone for TtlCache<K, V>
where
    K: Eq + Hash,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
        }
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key` for `ttl`, replacing any previous entry.
    ///
    /// TTLs beyond [`MAX_TTL`] are clamped to it.
    pub fn set(&self, key: K, value: V, ttl: Duration) {
        let now = Instant::now();
        let expires_at = now
            .checked_add(ttl.min(MAX_TTL))
            .unwrap_or_else(|| now + Duration::from_secs(1));
        self.inner.insert(key, CacheEntry { value, expires_at });
        metrics::record_cache_size(self.inner.len());
    }

    /// Get the value stored under `key`, if present and not expired.
    ///
    /// Not a pure read: finding an expired entry removes it.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();

        // The shard guard must be released before removing below.
        let value = match self.inner.get(key) {
            None => {
                metrics::record_cache_lookup("miss");
                return None;
            }
            Some(entry) if entry.is_expired_at(now) => None,
            Some(entry) => Some(entry.value.clone()),
        };

        if value.is_some() {
            metrics::record_cache_lookup("hit");
            return value;
        }

        // A concurrent `set` may have refreshed the entry meanwhile.
        self.inner.remove_if(key, |_, entry| entry.is_expired_at(now));
        metrics::record_cache_lookup("expired");
        metrics::record_cache_size(self.inner.len());
        None
    }

    /// Remove the entry under `key`, returning its value if it was still live.
    pub fn remove(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let removed = self.inner.remove(key);
        metrics::record_cache_size(self.inner.len());
        removed
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .map(|(_, entry)| entry.value)
    }

    /// Number of stored entries, expired ones not yet purged included.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.inner.len();
        self.inner.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before.saturating_sub(self.inner.len());
        if removed > 0 {
            tracing::debug!(removed, "Purged expired cache entries");
            metrics::record_cache_size(self.inner.len());
        }
        removed
    }

    /// Periodically purge expired entries until shutdown is signalled.
    pub async fn run_sweeper(self, interval: Duration, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(interval = ?interval, "Cache sweeper starting");

        let mut ticker = time::interval(interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.purge_expired();
                }
                _ = shutdown.recv() => {
                    tracing::info!("Cache sweeper received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[tokio::test(start_paused = true)]
    async fn test_get_after_set() {
        let cache: TtlCache<String, Value> = TtlCache::new();
        let data = json!({"key": "value"});
        cache.set("test_key".into(), data.clone(), Duration::from_secs(60));

        assert_eq!(cache.get(&"test_key".to_string()), Some(data));
        assert_eq!(cache.get(&"missing_key".to_string()), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_ttl_is_clamped() {
        let cache = TtlCache::new();
        cache.set("forever", 1, Duration::MAX);
        cache.set("long", 2, Duration::from_secs(u64::MAX));

        time::advance(Duration::from_secs(10 * 365 * 24 * 60 * 60)).await;
        assert_eq!(cache.get(&"forever"), Some(1));
        assert_eq!(cache.get(&"long"), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_is_idempotent() {
        let cache = TtlCache::new();
        cache.set("k", 1, Duration::from_secs(5));

        time::advance(Duration::from_secs(4)).await;
        assert_eq!(cache.get(&"k"), Some(1));

        time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get(&"k"), None);
        assert_eq!(cache.len(), 0, "expired entry purged on read");
        assert_eq!(cache.get(&"k"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_overwrites_and_refreshes_ttl() {
        let cache = TtlCache::new();
        cache.set("k", "old", Duration::from_secs(1));
        cache.set("k", "new", Duration::from_secs(10));

        time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.get(&"k"), Some("new"));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_ttl_never_visible() {
        let cache = TtlCache::new();
        cache.set("k", 1, Duration::ZERO);
        assert_eq!(cache.get(&"k"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove() {
        let cache = TtlCache::new();
        cache.set("live", 1, Duration::from_secs(10));
        cache.set("stale", 2, Duration::from_secs(1));
        time::advance(Duration::from_secs(2)).await;

        assert_eq!(cache.remove(&"live"), Some(1));
        assert_eq!(cache.remove(&"stale"), None);
        assert_eq!(cache.remove(&"absent"), None);
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired() {
        let cache = TtlCache::new();
        cache.set("a", 1, Duration::from_secs(1));
        cache.set("b", 2, Duration::from_secs(1));
        cache.set("c", 3, Duration::from_secs(60));

        time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.purge_expired(), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"c"), Some(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clones_share_storage() {
        let cache = TtlCache::new();
        let handle = cache.clone();
        handle.set("k", 1, Duration::from_secs(1));
        assert_eq!(cache.get(&"k"), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_purges_and_stops() {
        let cache = TtlCache::new();
        cache.set("k", 1, Duration::from_secs(1));

        let (tx, rx) = broadcast::channel(1);
        let task = tokio::spawn(cache.clone().run_sweeper(Duration::from_secs(5), rx));

        time::sleep(Duration::from_secs(6)).await;
        assert_eq!(cache.len(), 0);

        tx.send(()).unwrap();
        task.await.unwrap();
    }
}
