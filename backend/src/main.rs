//! Backend entry-point: loads settings, prepares storage, and serves the API.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use backend::settings::ServerSettings;
use server::{ServerConfig, create_server};

async fn connect_database(settings: &ServerSettings, url: &str) -> io::Result<DbPool> {
    let pool_size = settings.db_pool_size().map_err(io::Error::other)?;
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(pool_size))
        .await
        .map_err(io::Error::other)?;

    if settings.skip_migrations {
        info!("skipping database migrations");
    } else {
        let applied = run_migrations(&pool).await.map_err(io::Error::other)?;
        info!(count = applied.len(), "database migrations applied");
    }
    Ok(pool)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let token_secret = settings
        .token_secret(cfg!(debug_assertions))
        .map_err(io::Error::other)?;

    let cors_origins = settings.cors_allowed_origins();
    if cors_origins.is_empty() {
        warn!("no CORS origins configured; any origin may call the API");
    }

    let mut config = ServerConfig::new(bind_addr, token_secret).with_cors_origins(cors_origins);
    if let Some(url) = settings.database_url() {
        config = config.with_db_pool(connect_database(&settings, url).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting server");
    create_server(health_state, config)?.await
}
