//! Application settings and the HTTP server configuration built from them.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

use hostel::inbound::http::session_config::SessionSettings;
use hostel::outbound::persistence::DbPool;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_DEV_PASSWORD: &str = "hostel-dev";

/// Settings loaded via OrthoConfig from CLI flags, `HOSTEL_*` environment
/// variables and configuration files.
///
/// Session cookie settings are read separately by
/// [`hostel::inbound::http::session_config`].
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HOSTEL")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the server keeps everything in memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_pool_size: Option<u32>,
    /// Upsert the development accounts at startup.
    #[ortho_config(default = false)]
    pub seed_dev_accounts: bool,
    /// Shared password accepted for every account by the development login
    /// service.
    pub dev_password: Option<String>,
}

impl AppSettings {
    /// Parsed bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    pub fn db_pool_size(&self) -> u32 {
        self.db_pool_size.unwrap_or(DEFAULT_POOL_SIZE)
    }

    pub fn dev_password(&self) -> Zeroizing<String> {
        Zeroizing::new(
            self.dev_password
                .clone()
                .unwrap_or_else(|| DEFAULT_DEV_PASSWORD.to_owned()),
        )
    }
}

/// Everything needed to build and bind the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) seed_dev_accounts: bool,
    pub(crate) login_password: Zeroizing<String>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        session: SessionSettings,
        bind_addr: SocketAddr,
        login_password: Zeroizing<String>,
    ) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            seed_dev_accounts: false,
            login_password,
        }
    }

    /// Attach a database pool; the Diesel repositories replace the
    /// in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_dev_accounts(mut self, enabled: bool) -> Self {
        self.seed_dev_accounts = enabled;
        self
    }
}
