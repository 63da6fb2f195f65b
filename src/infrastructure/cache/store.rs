//! Cache store trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache store operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache store operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key-value store with per-key expiration.
///
/// Implementations must be thread-safe and fail open: a broken backend
/// degrades reads to misses and turns writes and deletions into logged
/// no-ops, so the service falls back to the repository instead of failing
/// requests. `expires_at` enforcement lives here, not in consuming code;
/// an expired entry is never returned from [`CacheStore::get`].
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisStore`] - Redis-backed store
/// - [`crate::infrastructure::cache::MemoryStore`] - in-process store
/// - [`crate::infrastructure::cache::NullStore`] - no-op for disabled caching
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Retrieves a value by key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` on cache hit
    /// - `Ok(None)` on miss, expired entry, or backend error (fail-open)
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a value under `key` with a TTL in seconds.
    ///
    /// # Errors
    ///
    /// Production implementations log backend errors and return `Ok(())`
    /// so a degraded cache never disrupts the write path.
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()>;

    /// Removes a key. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Enumerates live keys.
    ///
    /// Diagnostic only. Backends without enumeration support return an
    /// empty list rather than an error.
    async fn keys(&self) -> CacheResult<Vec<String>>;

    /// Remaining TTL for a key in seconds.
    ///
    /// Returns `Ok(None)` for missing keys, keys without expiry, or
    /// backends that cannot report TTLs. Must not refresh the TTL.
    async fn ttl(&self, key: &str) -> CacheResult<Option<i64>>;

    /// Checks if the cache backend is reachable.
    async fn health_check(&self) -> bool;
}
