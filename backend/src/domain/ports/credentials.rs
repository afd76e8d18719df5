//! Ports for password hashing and bearer token handling.
//!
//! Both are synchronous and free of side effects; adapters hold their key
//! material and parameters from startup onwards.

use crate::domain::{AccessToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential adapters.
    pub enum CredentialError {
        /// The password hash could not be produced.
        Hashing { message: String } => "password hashing failed: {message}",
        /// The token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
        /// The token is malformed, tampered with, or expired.
        InvalidToken => "token is invalid or expired",
    }
}

/// Salted one-way password hashing.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `secret` with a fresh random salt.
    fn hash(&self, secret: &str) -> Result<String, CredentialError>;

    /// Check `secret` against a stored hash. Malformed hashes never verify.
    fn verify(&self, secret: &str, hash: &str) -> bool;
}

/// Issues and validates time-bounded identity tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Sign a token identifying `user_id`.
    fn issue(&self, user_id: UserId) -> Result<AccessToken, CredentialError>;

    /// Verify signature and expiry and return the identified user.
    ///
    /// Every failure collapses to [`CredentialError::InvalidToken`].
    fn parse(&self, token: &str) -> Result<UserId, CredentialError>;
}
