//! Out-of-band cache warm-up tool.
//!
//! Pre-populates the cache with the full user and/or passenger collections
//! plus every singular entry, using the extended warm TTL. Intended for
//! scheduled runs (cron) or on-demand use after deployments; it never runs
//! inline with a request.
//!
//! # Usage
//!
//! ```bash
//! # Warm the user cache
//! cargo run --bin warm_cache -- users
//!
//! # Warm the passenger cache
//! cargo run --bin warm_cache -- passengers
//!
//! # Warm both
//! cargo run --bin warm_cache -- all
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `REDIS_URL` (required): warming a disabled cache is refused
//! - `CACHE_WARM_TTL_SECONDS`: TTL for warmed entries (default: 3600)

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

use passenger_registry::application::services::{PassengerService, UserService};
use passenger_registry::config;
use passenger_registry::infrastructure::cache::{RedisStore, ResourceCache};
use passenger_registry::infrastructure::persistence::{PgPassengerRepository, PgUserRepository};

/// Cache warm-up tool for passenger-registry.
#[derive(Parser)]
#[command(name = "warm_cache")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Which cache families to warm.
#[derive(Subcommand)]
enum Commands {
    /// Warm the user cache family
    Users,
    /// Warm the passenger cache family
    Passengers,
    /// Warm both families
    All,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let Some(redis_url) = config.redis_url.as_deref() else {
        bail!("REDIS_URL is not configured; there is no cache to warm");
    };

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    let store = RedisStore::connect(redis_url)
        .await
        .context("Failed to connect to Redis")?;

    let cache = Arc::new(ResourceCache::new(
        Arc::new(store),
        config.cache_ttl_seconds,
        config.cache_warm_ttl_seconds,
    ));

    let pool = Arc::new(pool);

    match cli.command {
        Commands::Users => {
            warm_users(pool, cache, config.cache_warm_ttl_seconds).await?;
        }
        Commands::Passengers => {
            warm_passengers(pool, cache, config.cache_warm_ttl_seconds).await?;
        }
        Commands::All => {
            warm_users(pool.clone(), cache.clone(), config.cache_warm_ttl_seconds).await?;
            warm_passengers(pool, cache, config.cache_warm_ttl_seconds).await?;
        }
    }

    Ok(())
}

async fn warm_users(
    pool: Arc<sqlx::PgPool>,
    cache: Arc<ResourceCache>,
    ttl: u64,
) -> Result<()> {
    let service = UserService::new(Arc::new(PgUserRepository::new(pool)), cache);
    let count = service.warm().await.context("Failed to warm user cache")?;

    println!(
        "{} Successfully cached {} users (TTL: {}s)",
        "✓".green().bold(),
        count.to_string().bold(),
        ttl
    );
    Ok(())
}

async fn warm_passengers(
    pool: Arc<sqlx::PgPool>,
    cache: Arc<ResourceCache>,
    ttl: u64,
) -> Result<()> {
    let service = PassengerService::new(Arc::new(PgPassengerRepository::new(pool)), cache);
    let count = service
        .warm()
        .await
        .context("Failed to warm passenger cache")?;

    println!(
        "{} Successfully cached {} passengers (TTL: {}s)",
        "✓".green().bold(),
        count.to_string().bold(),
        ttl
    );
    Ok(())
}
