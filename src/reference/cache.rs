//! In-memory cache store with sliding and absolute expiration
//!
//! An entry is live while both windows hold: it has been read or written
//! within the sliding window, and it was inserted within the absolute window.
//! Expired entries are treated as misses and dropped when next touched.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Expiration windows applied to every entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationPolicy {
    pub sliding: Duration,
    pub absolute: Duration,
}

impl ExpirationPolicy {
    pub fn new(sliding: Duration, absolute: Duration) -> Self {
        Self { sliding, absolute }
    }
}

impl Default for ExpirationPolicy {
    fn default() -> Self {
        Self {
            sliding: Duration::from_secs(30 * 60),
            absolute: Duration::from_secs(60 * 60),
        }
    }
}

#[derive(Debug)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
    /// Nanoseconds since the store's epoch, so hits can refresh it under a read lock
    last_access: AtomicU64,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, policy: &ExpirationPolicy, epoch: Instant, now: Instant) -> bool {
        let last_access = epoch + Duration::from_nanos(self.last_access.load(Ordering::Relaxed));
        now.duration_since(last_access) >= policy.sliding
            || now.duration_since(self.inserted_at) >= policy.absolute
    }

    fn touch(&self, epoch: Instant, now: Instant) {
        self.last_access
            .fetch_max(nanos_since(epoch, now), Ordering::Relaxed);
    }
}

fn nanos_since(epoch: Instant, now: Instant) -> u64 {
    u64::try_from(now.duration_since(epoch).as_nanos()).unwrap_or(u64::MAX)
}

/// Shared key/value store, cheap to clone
///
/// Hits only take the read lock; writers are inserts, removals and the
/// eviction of an entry found expired.
#[derive(Debug, Clone)]
pub struct CacheStore<K, V> {
    entries: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
    policy: ExpirationPolicy,
    epoch: Instant,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(policy: ExpirationPolicy) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            policy,
            epoch: Instant::now(),
        }
    }

    pub fn policy(&self) -> ExpirationPolicy {
        self.policy
    }

    /// Return a live entry and refresh its sliding window
    pub async fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            let entry = entries.get(key)?;
            if !entry.is_expired(&self.policy, self.epoch, now) {
                entry.touch(self.epoch, now);
                return Some(entry.value.clone());
            }
        }

        // re-check under the write lock, the entry may have been replaced
        let mut entries = self.entries.write().await;
        if entries
            .get(key)
            .is_some_and(|entry| entry.is_expired(&self.policy, self.epoch, now))
        {
            entries.remove(key);
        }
        None
    }

    pub async fn insert(&self, key: K, value: V) {
        let now = Instant::now();
        self.entries.write().await.insert(
            key,
            CacheEntry {
                value,
                inserted_at: now,
                last_access: AtomicU64::new(nanos_since(self.epoch, now)),
            },
        );
    }

    pub async fn remove(&self, key: &K) -> Option<V> {
        self.entries.write().await.remove(key).map(|entry| entry.value)
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Drop every expired entry, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(&self.policy, self.epoch, now));
        before - entries.len()
    }

    /// Number of stored entries, including ones that have expired but not been purged
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl<K, V> Default for CacheStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new(ExpirationPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CacheStore<&'static str, u32> {
        CacheStore::new(ExpirationPolicy::new(
            Duration::from_secs(30),
            Duration::from_secs(60),
        ))
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let cache = store();
        cache.insert("a", 1).await;

        assert_eq!(cache.get(&"a").await, Some(1));
        assert_eq!(cache.get(&"b").await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sliding_expiration_evicts_idle_entry() {
        let cache = store();
        cache.insert("a", 1).await;

        tokio::time::advance(Duration::from_secs(31)).await;

        assert_eq!(cache.get(&"a").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_access_refreshes_sliding_window() {
        let cache = store();
        cache.insert("a", 1).await;

        tokio::time::advance(Duration::from_secs(20)).await;
        assert_eq!(cache.get(&"a").await, Some(1));

        tokio::time::advance(Duration::from_secs(20)).await;
        assert_eq!(cache.get(&"a").await, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_absolute_expiration_wins_over_sliding() {
        let cache = store();
        cache.insert("a", 1).await;

        for _ in 0..5 {
            tokio::time::advance(Duration::from_secs(11)).await;
            assert_eq!(cache.get(&"a").await, Some(1));
        }

        // 66s since insertion: accessed 11s ago, but past the absolute window
        tokio::time::advance(Duration::from_secs(11)).await;
        assert_eq!(cache.get(&"a").await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired() {
        let cache = store();
        cache.insert("old", 1).await;
        tokio::time::advance(Duration::from_secs(31)).await;
        cache.insert("new", 2).await;

        assert_eq!(cache.purge_expired().await, 1);
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get(&"new").await, Some(2));
    }

    #[tokio::test]
    async fn test_hit_does_not_wait_for_other_readers() {
        let cache = store();
        cache.insert("a", 1).await;

        let _reader = cache.entries.read().await;
        let hit = tokio::time::timeout(Duration::from_millis(200), cache.get(&"a")).await;

        assert_eq!(hit.ok().flatten(), Some(1));
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let cache = store();
        cache.insert("a", 1).await;
        cache.insert("b", 2).await;

        assert_eq!(cache.remove(&"a").await, Some(1));
        assert_eq!(cache.len().await, 1);

        cache.clear().await;
        assert!(cache.is_empty().await);
    }
}
