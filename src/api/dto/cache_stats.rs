//! DTO for the cache introspection endpoint.

use crate::infrastructure::cache::CacheStats;
use serde::Serialize;
use std::collections::BTreeMap;

/// Diagnostic snapshot of the cache key space.
#[derive(Debug, Serialize)]
pub struct CacheStatsResponse {
    pub cache_keys: Vec<String>,
    pub total_keys: usize,
    /// Remaining TTL in seconds per key. Keys without a reportable TTL are
    /// listed in `cache_keys` but absent here.
    pub key_ttls: BTreeMap<String, i64>,
    /// Configured default TTL for request-path cache entries.
    pub cache_timeout: u64,
}

impl CacheStatsResponse {
    pub fn from_stats(stats: CacheStats, cache_timeout: u64) -> Self {
        Self {
            cache_keys: stats.keys,
            total_keys: stats.count,
            key_ttls: stats.ttl_by_key,
            cache_timeout,
        }
    }
}
