//! Hostel backend entry-point: loads settings, wires storage and serves the
//! REST API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use hostel::inbound::http::health::HealthState;
use hostel::inbound::http::session_config::{BuildMode, session_settings_from_env};
use hostel::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use ortho_config::OrthoConfig;
use server::{AppSettings, ServerConfig, build_http_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::current())
        .map_err(|e| std::io::Error::other(format!("invalid session settings: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;

    let mut config = ServerConfig::new(session, bind_addr, settings.dev_password())
        .with_dev_accounts(settings.seed_dev_accounts);
    if let Some(url) = settings.database_url.as_deref() {
        config = config.with_db_pool(connect(url, settings.db_pool_size()).await?);
    }

    let http_state = build_http_state(&config).await?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, http_state, config)?;
    info!(%bind_addr, "hostel backend listening");
    server.await
}

/// Apply pending migrations, then open the connection pool.
async fn connect(url: &str, max_size: u32) -> std::io::Result<DbPool> {
    let applied = run_pending_migrations(url)
        .await
        .map_err(|e| std::io::Error::other(format!("database migration failed: {e}")))?;
    info!(applied, "database migrations complete");
    DbPool::new(PoolConfig::new(url).with_max_size(max_size))
        .await
        .map_err(|e| std::io::Error::other(format!("database pool creation failed: {e}")))
}
