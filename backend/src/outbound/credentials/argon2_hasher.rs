//! Argon2id implementation of the [`PasswordHasher`] port.
//!
//! Hashes are stored in PHC string format, so the salt and cost parameters
//! travel with each hash and verification works across parameter changes.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::domain::ports::{CredentialError, PasswordHasher};

/// Argon2id hasher with configurable cost parameters.
#[derive(Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Hasher using the crate's recommended defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher with explicit memory (KiB), iteration, and lane costs.
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        lanes: u32,
    ) -> Result<Self, CredentialError> {
        let params = Params::new(memory_kib, iterations, lanes, None)
            .map_err(|err| CredentialError::hashing(err.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, secret: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| CredentialError::hashing(err.to_string()))
    }

    fn verify(&self, secret: &str, hash: &str) -> bool {
        PasswordHash::new(hash)
            .is_ok_and(|parsed| self.argon2.verify_password(secret.as_bytes(), &parsed).is_ok())
    }
}
