//! Time-boxed memoization of fetch results.
//!
//! Each key maps to the last successful value and the instant it was fetched.
//! A value is served while it is younger than the TTL; after that the next
//! caller refetches and the entry is replaced whole. Failures are never stored.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug)]
pub struct CacheEntry<V> {
    pub value: Arc<V>,
    pub fetched_at: Instant,
}

impl<V> CacheEntry<V> {
    pub fn new(value: V, fetched_at: Instant) -> Self {
        Self {
            value: Arc::new(value),
            fetched_at,
        }
    }

    pub fn is_fresh(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.fetched_at) < ttl
    }
}

/// One key's entry. Locked for the duration of a fetch on that key only.
type Slot<V> = Arc<Mutex<Option<CacheEntry<V>>>>;

pub struct TtlCache<K, V> {
    ttl: Duration,
    slots: Mutex<HashMap<K, Slot<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Serve a fresh entry, or run `fetch` and cache its result on success.
    ///
    /// Only the slot for `key` stays locked while `fetch` runs: a burst of
    /// callers on a cold or expired key triggers one fetch and all of them
    /// observe its value, while other keys are served as usual.
    pub async fn get_or_try_fetch<F, Fut, E>(&self, key: K, fetch: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let slot = self.slot(&key).await;
        let mut entry = slot.lock().await;

        if let Some(cached) = entry.as_ref() {
            if cached.is_fresh(self.ttl, Instant::now()) {
                debug!("Cache hit for {:?}", key);
                return Ok(Arc::clone(&cached.value));
            }
        }

        debug!("Cache miss for {:?}", key);
        let fresh = CacheEntry::new(fetch().await?, Instant::now());
        let value = Arc::clone(&fresh.value);
        *entry = Some(fresh);
        drop(entry);
        drop(slot);

        self.prune().await;
        Ok(value)
    }

    async fn slot(&self, key: &K) -> Slot<V> {
        let mut slots = self.slots.lock().await;
        Arc::clone(slots.entry(key.clone()).or_default())
    }

    /// Drop slots that hold nothing fresh and that no caller is using.
    async fn prune(&self) {
        let now = Instant::now();
        let ttl = self.ttl;
        let mut slots = self.slots.lock().await;
        // Slots are only cloned under the map lock, so a count of one means
        // nobody else can be about to lock it.
        slots.retain(|_, slot| {
            Arc::strong_count(slot) > 1
                || match slot.try_lock() {
                    Ok(entry) => entry.as_ref().is_some_and(|e| e.is_fresh(ttl, now)),
                    Err(_) => true,
                }
        });
    }

    #[cfg(test)]
    async fn get(&self, key: &K) -> Option<Arc<V>> {
        let slot = self.slots.lock().await.get(key).cloned()?;
        let entry = slot.lock().await;
        let value = entry
            .as_ref()
            .filter(|e| e.is_fresh(self.ttl, Instant::now()))
            .map(|e| Arc::clone(&e.value));
        value
    }

    #[cfg(test)]
    async fn insert(&self, key: K, value: V) -> Arc<V> {
        let slot = self.slot(&key).await;
        let entry = CacheEntry::new(value, Instant::now());
        let value = Arc::clone(&entry.value);
        *slot.lock().await = Some(entry);
        drop(slot);
        self.prune().await;
        value
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }
}
