//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache store selection, and Axum server
//! lifecycle.

use crate::application::services::{PassengerService, UserService};
use crate::config::Config;
use crate::infrastructure::cache::{CacheStore, NullStore, RedisStore, ResourceCache};
use crate::infrastructure::persistence::{PgPassengerRepository, PgUserRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Selects the cache store: Redis when configured and reachable, otherwise
/// the no-op store. A failed Redis connection downgrades to NullStore so
/// the service starts and runs off the repository.
pub async fn build_cache_store(config: &Config) -> Arc<dyn CacheStore> {
    if let Some(redis_url) = &config.redis_url {
        match RedisStore::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullStore.", e);
                Arc::new(NullStore::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullStore)");
        Arc::new(NullStore::new())
    }
}

/// Builds shared application state from connected collaborators.
pub fn build_state(pool: Arc<sqlx::PgPool>, store: Arc<dyn CacheStore>, config: &Config) -> AppState {
    let cache = Arc::new(ResourceCache::new(
        store,
        config.cache_ttl_seconds,
        config.cache_warm_ttl_seconds,
    ));

    let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
    let passenger_repository = Arc::new(PgPassengerRepository::new(pool));

    AppState::new(
        Arc::new(UserService::new(user_repository, cache.clone())),
        Arc::new(PassengerService::new(passenger_repository, cache.clone())),
        cache,
    )
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Redis cache (or NullStore fallback)
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let store = build_cache_store(&config).await;
    let state = build_state(Arc::new(pool), store, &config);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service(app),
    )
    .await?;

    Ok(())
}
