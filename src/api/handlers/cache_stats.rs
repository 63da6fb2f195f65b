//! Handler for cache introspection.

use axum::{Json, extract::State};

use crate::api::dto::cache_stats::CacheStatsResponse;
use crate::state::AppState;

/// Reports the current cache key set with remaining TTLs.
///
/// # Endpoint
///
/// `GET /api/cache-stats`
///
/// Diagnostic only: reading stats neither mutates the store nor refreshes
/// any TTL. When the backing store cannot enumerate keys the response is
/// simply empty; this endpoint never fails.
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let stats = state.cache.stats().await;
    Json(CacheStatsResponse::from_stats(stats, state.cache.read_ttl()))
}
