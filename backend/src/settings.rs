//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags and `EXCHANGE_*` environment variables. The
//! resolved settings are immutable and handed to the server at startup.

use std::fmt;
use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_SIZE: u32 = 10;
const MIN_SECRET_BYTES: usize = 16;

/// Errors raised while resolving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("token secret is required; set EXCHANGE_TOKEN_SECRET")]
    MissingTokenSecret,
    #[error("token secret must be at least {MIN_SECRET_BYTES} bytes")]
    WeakTokenSecret,
    #[error("database pool size must be positive")]
    InvalidPoolSize,
}

/// Settings controlling the HTTP server, storage, and token signing.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXCHANGE")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. When absent the in-process store is used.
    pub database_url: Option<String>,
    /// HMAC secret for bearer tokens.
    pub token_secret: Option<String>,
    /// Permit a random per-process secret outside debug builds.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
    /// Maximum pooled database connections.
    pub db_pool_size: Option<u32>,
    /// Skip embedded migrations at startup.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
    /// Comma-separated browser origins allowed to call the API. Unset admits any.
    pub cors_allowed_origins: Option<String>,
}

/// Secret used to sign tokens, wiped from memory on drop.
pub enum TokenSecret {
    Configured(Zeroizing<Vec<u8>>),
    /// Random secret; tokens do not survive a restart.
    Ephemeral(Zeroizing<Vec<u8>>),
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_ephemeral() { "Ephemeral" } else { "Configured" };
        f.debug_tuple(kind).field(&"<redacted>").finish()
    }
}

impl TokenSecret {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Configured(bytes) | Self::Ephemeral(bytes) => bytes.as_slice(),
        }
    }

    pub fn is_ephemeral(&self) -> bool {
        matches!(self, Self::Ephemeral(_))
    }

    fn generate() -> Self {
        let mut bytes = Vec::with_capacity(32);
        bytes.extend_from_slice(Uuid::new_v4().as_bytes());
        bytes.extend_from_slice(Uuid::new_v4().as_bytes());
        Self::Ephemeral(Zeroizing::new(bytes))
    }
}

impl ServerSettings {
    /// Parsed listen address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self
            .bind_addr
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                source,
            })
    }

    /// Database URL when persistence is configured.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Pool size, defaulting to ten connections.
    pub fn db_pool_size(&self) -> Result<u32, SettingsError> {
        match self.db_pool_size {
            Some(0) => Err(SettingsError::InvalidPoolSize),
            Some(size) => Ok(size),
            None => Ok(DEFAULT_POOL_SIZE),
        }
    }

    /// Allowed CORS origins; empty means any origin.
    pub fn cors_allowed_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Resolve the token secret.
    ///
    /// Without a configured secret an ephemeral one is generated only when
    /// `debug_build` is set or ephemeral secrets were explicitly allowed.
    pub fn token_secret(&self, debug_build: bool) -> Result<TokenSecret, SettingsError> {
        match self.token_secret.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) if secret.len() < MIN_SECRET_BYTES => Err(SettingsError::WeakTokenSecret),
            Some(secret) => Ok(TokenSecret::Configured(Zeroizing::new(
                secret.as_bytes().to_vec(),
            ))),
            None if debug_build || self.allow_ephemeral_secret => Ok(TokenSecret::generate()),
            None => Err(SettingsError::MissingTokenSecret),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "EXCHANGE_BIND_ADDR",
        "EXCHANGE_DATABASE_URL",
        "EXCHANGE_TOKEN_SECRET",
        "EXCHANGE_ALLOW_EPHEMERAL_SECRET",
        "EXCHANGE_DB_POOL_SIZE",
        "EXCHANGE_SKIP_MIGRATIONS",
        "EXCHANGE_CORS_ALLOWED_ORIGINS",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("exchange-backend")])
            .expect("config should load")
    }

    /// Every variable cleared except the supplied overrides.
    fn env_with(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(env_with(&[]));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("default addr"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("valid addr")
        );
        assert!(settings.database_url().is_none());
        assert_eq!(settings.db_pool_size().expect("pool size"), DEFAULT_POOL_SIZE);
        assert!(!settings.allow_ephemeral_secret);
        assert!(!settings.skip_migrations);
        assert!(settings.cors_allowed_origins().is_empty());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(env_with(&[
            ("EXCHANGE_BIND_ADDR", "127.0.0.1:9000"),
            ("EXCHANGE_DATABASE_URL", "postgres://localhost/exchange"),
            ("EXCHANGE_DB_POOL_SIZE", "4"),
            ("EXCHANGE_SKIP_MIGRATIONS", "true"),
        ]));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("addr").to_string(),
            "127.0.0.1:9000"
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://localhost/exchange")
        );
        assert_eq!(settings.db_pool_size().expect("pool size"), 4);
        assert!(settings.skip_migrations);
    }

    #[rstest]
    fn cors_origins_are_split_and_trimmed() {
        let _guard = lock_env(env_with(&[(
            "EXCHANGE_CORS_ALLOWED_ORIGINS",
            "http://localhost:3000, https://exchange.example ,",
        )]));

        let origins = load_from_empty_args().cors_allowed_origins();

        assert_eq!(origins, ["http://localhost:3000", "https://exchange.example"]);
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let _guard = lock_env(env_with(&[("EXCHANGE_BIND_ADDR", "not-an-addr")]));

        let error = load_from_empty_args().bind_addr().expect_err("invalid addr");

        assert!(matches!(error, SettingsError::InvalidBindAddr { .. }));
    }

    #[rstest]
    #[case(true, false, true)]
    #[case(false, true, true)]
    #[case(false, false, false)]
    fn missing_secret_needs_debug_or_explicit_opt_in(
        #[case] debug_build: bool,
        #[case] allow_ephemeral: bool,
        #[case] resolves: bool,
    ) {
        let overrides: &[(&str, &str)] = if allow_ephemeral {
            &[("EXCHANGE_ALLOW_EPHEMERAL_SECRET", "true")]
        } else {
            &[]
        };
        let _guard = lock_env(env_with(overrides));

        let result = load_from_empty_args().token_secret(debug_build);

        match result {
            Ok(secret) => {
                assert!(resolves);
                assert!(secret.is_ephemeral());
                assert_eq!(secret.as_bytes().len(), 32);
            }
            Err(error) => {
                assert!(!resolves);
                assert!(matches!(error, SettingsError::MissingTokenSecret));
            }
        }
    }

    #[rstest]
    fn configured_secret_wins_in_release_builds() {
        let _guard = lock_env(env_with(&[(
            "EXCHANGE_TOKEN_SECRET",
            "a-long-enough-signing-secret",
        )]));

        let secret = load_from_empty_args()
            .token_secret(false)
            .expect("configured secret");

        assert!(!secret.is_ephemeral());
        assert_eq!(secret.as_bytes(), b"a-long-enough-signing-secret");
    }

    #[rstest]
    fn short_secret_is_rejected() {
        let _guard = lock_env(env_with(&[("EXCHANGE_TOKEN_SECRET", "short")]));

        let error = load_from_empty_args()
            .token_secret(true)
            .expect_err("weak secret");

        assert!(matches!(error, SettingsError::WeakTokenSecret));
    }
}
