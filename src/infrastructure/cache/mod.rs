//! Caching layer keeping reads fast and writes consistent.
//!
//! Provides a [`CacheStore`] trait with three implementations:
//! - [`RedisStore`] - Production Redis-backed store
//! - [`MemoryStore`] - In-process store for development and tests
//! - [`NullStore`] - No-op implementation for disabled caching
//!
//! [`ResourceCache`] layers the read-through / write-through policy and
//! key discipline on top of whichever store is configured.

mod keys;
mod layer;
mod memory_store;
mod null_store;
mod redis_store;
mod store;

pub use keys::{Resource, cache_key};
pub use layer::{CacheStats, ResourceCache};
pub use memory_store::MemoryStore;
pub use null_store::NullStore;
pub use redis_store::RedisStore;
pub use store::{CacheError, CacheResult, CacheStore};
