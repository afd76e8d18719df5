//! Driving port for registration and login.
//!
//! Inbound adapters call this port to create accounts and exchange
//! credentials for bearer tokens without knowing how either is stored.

use async_trait::async_trait;

use crate::domain::{AuthSession, Error, LoginCredentials, Registration};

/// Account use-cases.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account and sign the new user in.
    ///
    /// Fails with `conflict` when the email address is already registered.
    async fn register(&self, registration: Registration) -> Result<AuthSession, Error>;

    /// Verify credentials and issue a token.
    ///
    /// Unknown addresses and wrong passwords produce the same `unauthorized`
    /// error.
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error>;
}
