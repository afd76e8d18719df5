//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use backend::outbound::persistence::DbPool;
use backend::settings::TokenSecret;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) token_secret: TokenSecret,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Construct a server configuration backed by the in-process store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, token_secret: TokenSecret) -> Self {
        Self {
            bind_addr,
            token_secret,
            db_pool: None,
            cors_origins: Vec::new(),
        }
    }

    /// Restrict browser access to these origins. Empty admits any origin.
    #[must_use]
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// Attach a database connection pool; repositories then use PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
