//! In-process cache store with per-key expiration.

use super::store::{CacheResult, CacheStore};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};
use tracing::debug;

struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-memory cache store.
///
/// Backs local development without Redis and the hermetic test suites.
/// Expiry is measured on `tokio::time::Instant`, so tests can pause and
/// advance the runtime clock to exercise TTL behavior deterministically.
///
/// Expired entries are never returned; they are swept lazily on writes and
/// enumeration rather than by a background task.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        debug!("Using MemoryStore (in-process cache)");
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|e| e.expires_at > Instant::now())
            .map(|e| e.value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()> {
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        entries.retain(|_, e| e.expires_at > now);
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: now + Duration::from_secs(ttl_seconds),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn keys(&self) -> CacheResult<Vec<String>> {
        let entries = self.entries.read().await;
        let now = Instant::now();
        let mut keys: Vec<String> = entries
            .iter()
            .filter(|(_, e)| e.expires_at > now)
            .map(|(k, _)| k.clone())
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn ttl(&self, key: &str) -> CacheResult<Option<i64>> {
        let entries = self.entries.read().await;
        let now = Instant::now();
        // Rounds up, matching how Redis reports partial seconds.
        Ok(entries
            .get(key)
            .filter(|e| e.expires_at > now)
            .map(|e| {
                let remaining = e.expires_at - now;
                let mut secs = remaining.as_secs() as i64;
                if remaining.subsec_nanos() > 0 {
                    secs += 1;
                }
                secs
            }))
    }

    async fn health_check(&self) -> bool {
        true
    }
}
