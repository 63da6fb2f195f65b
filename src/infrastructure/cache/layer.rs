//! Cache consistency layer over a [`CacheStore`].
//!
//! [`ResourceCache`] implements the read-through and write-through
//! policies for the `user` / `passenger` key families:
//!
//! - reads populate on miss with the read TTL;
//! - creates invalidate the collection key;
//! - updates invalidate both keys and re-populate the singular key with
//!   the fresh value (write-through);
//! - deletes invalidate both keys;
//! - warm-up pre-populates the whole family with an extended TTL.
//!
//! Invalidation is intentionally scoped per resource: passenger operations
//! only ever touch `passenger_*` keys, user operations only `user_*` keys.
//! A cached passenger embeds a user snapshot whose staleness is bounded by
//! the passenger entry's own TTL, not corrected on user changes.
//!
//! Concurrent misses on the same key are tolerated to race; both callers
//! fetch and both write, last writer wins. The fetched values are
//! idempotent re-reads of the same source of truth, so no per-key locking
//! is done.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use tokio::time::Instant;
use tracing::{debug, warn};

use super::keys::{Resource, cache_key};
use super::store::CacheStore;
use crate::error::AppError;

/// Snapshot of the live cache key set, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub keys: Vec<String>,
    pub count: usize,
    pub ttl_by_key: BTreeMap<String, i64>,
}

/// Read-through / write-through cache policy for a key-value store.
pub struct ResourceCache {
    store: Arc<dyn CacheStore>,
    read_ttl: u64,
    warm_ttl: u64,
}

impl ResourceCache {
    /// Creates the cache layer.
    ///
    /// `read_ttl` applies to entries populated on the request path,
    /// `warm_ttl` to entries written by [`ResourceCache::warm`].
    pub fn new(store: Arc<dyn CacheStore>, read_ttl: u64, warm_ttl: u64) -> Self {
        Self {
            store,
            read_ttl,
            warm_ttl,
        }
    }

    /// TTL in seconds for request-path cache entries.
    pub fn read_ttl(&self) -> u64 {
        self.read_ttl
    }

    /// Checks if the backing store is reachable.
    pub async fn health_check(&self) -> bool {
        self.store.health_check().await
    }

    /// Cache-aside read.
    ///
    /// Builds the canonical key for `(resource, id)` (`id = None` selects
    /// the collection key), returns the cached value on a hit, and on a
    /// miss runs `fetch`, stores its result with the read TTL, and returns
    /// it. A miss is the normal path, never an error; only `fetch` itself
    /// can fail, and its errors propagate unchanged.
    ///
    /// An undecodable cached value is evicted and treated as a miss.
    pub async fn read_through<T, F, Fut>(
        &self,
        resource: Resource,
        id: Option<i64>,
        fetch: F,
    ) -> Result<T, AppError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let started = Instant::now();
        let key = cache_key(resource, id);

        if let Ok(Some(raw)) = self.store.get(&key).await {
            match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    metrics::counter!("cache_hits_total", "resource" => resource.as_str())
                        .increment(1);
                    observe("read_through", &key, started);
                    return Ok(value);
                }
                Err(e) => {
                    warn!("Evicting undecodable cache entry {}: {}", key, e);
                    let _ = self.store.delete(&key).await;
                }
            }
        }

        metrics::counter!("cache_misses_total", "resource" => resource.as_str()).increment(1);

        let value = fetch().await?;

        match serde_json::to_string(&value) {
            Ok(raw) => {
                let _ = self.store.set(&key, &raw, self.read_ttl).await;
            }
            Err(e) => warn!("Failed to serialize value for {}: {}", key, e),
        }

        observe("read_through", &key, started);
        Ok(value)
    }

    /// Invalidation after a successful create.
    ///
    /// Drops the collection key only; the new entity has never been cached,
    /// so its singular key is populated by the next retrieve.
    pub async fn on_create(&self, resource: Resource) {
        let _ = self.store.delete(&cache_key(resource, None)).await;
    }

    /// Write-through after a successful update.
    ///
    /// Drops the collection key and the singular key, then immediately
    /// re-populates the singular key with the post-update value at the
    /// read TTL. A retrieve right after this call observes the updated
    /// entity without a repository round-trip.
    pub async fn on_update<T: Serialize>(&self, resource: Resource, id: i64, entity: &T) {
        let started = Instant::now();

        let _ = self.store.delete(&cache_key(resource, None)).await;

        let singular = cache_key(resource, Some(id));
        let _ = self.store.delete(&singular).await;

        match serde_json::to_string(entity) {
            Ok(raw) => {
                let _ = self.store.set(&singular, &raw, self.read_ttl).await;
            }
            Err(e) => warn!("Failed to serialize value for {}: {}", singular, e),
        }

        observe("on_update", &singular, started);
    }

    /// Invalidation after a successful delete.
    ///
    /// Drops the collection key and the singular key for the removed id.
    /// Both keys come from the canonical builder; nothing here formats a
    /// key by hand.
    pub async fn on_delete(&self, resource: Resource, id: i64) {
        let _ = self.store.delete(&cache_key(resource, None)).await;
        let _ = self.store.delete(&cache_key(resource, Some(id))).await;
    }

    /// Pre-populates the whole key family for a resource.
    ///
    /// Stores the collection under the collection key and every member
    /// under its singular key, all with the warm TTL. Idempotent: running
    /// it again overwrites with equally fresh data. Intended to run
    /// out-of-band (see the `warm_cache` binary), never inline with a
    /// request.
    ///
    /// Returns the number of members written.
    pub async fn warm<T, F>(&self, resource: Resource, items: &[T], id_of: F) -> usize
    where
        T: Serialize,
        F: Fn(&T) -> i64,
    {
        let started = Instant::now();
        let collection_key = cache_key(resource, None);

        match serde_json::to_string(items) {
            Ok(raw) => {
                let _ = self.store.set(&collection_key, &raw, self.warm_ttl).await;
            }
            Err(e) => warn!("Failed to serialize collection for {}: {}", collection_key, e),
        }

        for item in items {
            let key = cache_key(resource, Some(id_of(item)));
            match serde_json::to_string(item) {
                Ok(raw) => {
                    let _ = self.store.set(&key, &raw, self.warm_ttl).await;
                }
                Err(e) => warn!("Failed to serialize value for {}: {}", key, e),
            }
        }

        debug!("Warmed {} {} entries", items.len(), resource);
        observe("warm", &collection_key, started);
        items.len()
    }

    /// Reports the live key set with remaining TTLs.
    ///
    /// Read-only: observing a TTL does not refresh it. Stores that cannot
    /// enumerate keys yield an empty result; this never fails a request.
    /// Keys whose TTL cannot be reported are listed without an entry in
    /// `ttl_by_key`.
    pub async fn stats(&self) -> CacheStats {
        let keys = self.store.keys().await.unwrap_or_default();

        let mut ttl_by_key = BTreeMap::new();
        for key in &keys {
            if let Ok(Some(secs)) = self.store.ttl(key).await {
                ttl_by_key.insert(key.clone(), secs);
            }
        }

        CacheStats {
            count: keys.len(),
            keys,
            ttl_by_key,
        }
    }
}

/// Timing observer for cache operations: records the duration under the
/// operation name and logs it at debug level.
fn observe(op: &'static str, key: &str, started: Instant) {
    let elapsed = started.elapsed();
    metrics::histogram!("cache_op_duration_seconds", "op" => op).record(elapsed.as_secs_f64());
    debug!("{} {}: {:.4}s", op, key, elapsed.as_secs_f64());
}
