//! No-op cache store for testing or disabled caching.

use super::store::{CacheResult, CacheStore};
use async_trait::async_trait;
use tracing::debug;

/// A cache store that does nothing.
///
/// Used when Redis is unavailable or caching is explicitly disabled. Every
/// read is a miss, every write succeeds without storing anything, and key
/// enumeration is empty, so the service runs entirely off the repository.
pub struct NullStore;

impl NullStore {
    pub fn new() -> Self {
        debug!("Using NullStore (caching disabled)");
        Self
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for NullStore {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl_seconds: u64) -> CacheResult<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn keys(&self) -> CacheResult<Vec<String>> {
        Ok(Vec::new())
    }

    async fn ttl(&self, _key: &str) -> CacheResult<Option<i64>> {
        Ok(None)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
