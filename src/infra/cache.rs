//! Short-TTL response cache for read-heavy catalog queries.
//!
//! Advisory only: callers compute from the store on a miss, populate, and
//! return. Writes to the store invalidate the relevant prefix synchronously
//! before reporting success, so a read after a successful write never
//! observes the pre-write payload.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use metrics::counter;
use serde_json::Value;
use tokio::sync::RwLock;

#[derive(Clone)]
struct CacheEntry {
    payload: Value,
    stored_at: Instant,
}

#[derive(Clone)]
pub struct ResponseCache {
    ttl: Duration,
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Look up a fresh entry. Stale entries count as misses; they are swept
    /// on the next `put`.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let guard = self.entries.read().await;
        let hit = guard
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.payload.clone());
        if hit.is_some() {
            counter!("bottega_cache_hit_total").increment(1);
        } else {
            counter!("bottega_cache_miss_total").increment(1);
        }
        hit
    }

    pub async fn put(&self, key: String, payload: Value) {
        let mut guard = self.entries.write().await;
        guard.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        guard.insert(
            key,
            CacheEntry {
                payload,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop every entry whose key starts with `prefix`.
    pub async fn invalidate_prefix(&self, prefix: &str) {
        let mut guard = self.entries.write().await;
        guard.retain(|key, _| !key.starts_with(prefix));
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
