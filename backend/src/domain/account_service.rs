//! Registration and login.
//!
//! Login against an unknown address still performs a full password
//! verification against a placeholder hash so response latency does not
//! reveal which addresses are registered.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{AccountService, PasswordHasher, TokenService, UserRepository};
use crate::domain::service_support::{map_credential_error, map_user_repository_error};
use crate::domain::{AuthSession, Error, LoginCredentials, NewUser, Registration, User};

const INVALID_CREDENTIALS: &str = "invalid email or password";
const PLACEHOLDER_SECRET: &str = "placeholder-secret-for-timing";

/// Account service implementing the [`AccountService`] driving port.
#[derive(Clone)]
pub struct AccountServiceImpl<U> {
    users: Arc<U>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
    clock: Arc<dyn Clock>,
    placeholder_hash: Arc<OnceLock<Option<String>>>,
}

impl<U> AccountServiceImpl<U> {
    /// Create the service from its collaborators.
    pub fn new(
        users: Arc<U>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
            placeholder_hash: Arc::new(OnceLock::new()),
        }
    }

    fn burn_verification(&self, password: &str) {
        let placeholder = self
            .placeholder_hash
            .get_or_init(|| self.hasher.hash(PLACEHOLDER_SECRET).ok());
        if let Some(hash) = placeholder {
            let _ = self.hasher.verify(password, hash);
        }
    }

    fn session_for(&self, user: &User) -> Result<AuthSession, Error> {
        let token = self.tokens.issue(user.id).map_err(map_credential_error)?;
        Ok(AuthSession {
            token,
            user: user.profile(),
        })
    }
}

#[async_trait]
impl<U> AccountService for AccountServiceImpl<U>
where
    U: UserRepository,
{
    async fn register(&self, registration: Registration) -> Result<AuthSession, Error> {
        let existing = self
            .users
            .find_by_email(registration.email())
            .await
            .map_err(map_user_repository_error)?;
        if existing.is_some() {
            return Err(Error::conflict("email is already registered"));
        }

        let password_hash = self
            .hasher
            .hash(registration.password())
            .map_err(map_credential_error)?;
        let new_user = NewUser {
            name: registration.name().clone(),
            email: registration.email().clone(),
            password_hash,
            created_at: self.clock.utc(),
        };
        let user = self
            .users
            .create(&new_user)
            .await
            .map_err(map_user_repository_error)?;

        info!(user_id = %user.id, "user registered");
        self.session_for(&user)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error> {
        let user = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_repository_error)?;

        match user {
            Some(user) if self.hasher.verify(credentials.password(), &user.password_hash) => {
                debug!(user_id = %user.id, "login succeeded");
                self.session_for(&user)
            }
            Some(user) => {
                debug!(user_id = %user.id, "login rejected: wrong password");
                Err(Error::unauthorized(INVALID_CREDENTIALS))
            }
            None => {
                self.burn_verification(credentials.password());
                debug!("login rejected: unknown email");
                Err(Error::unauthorized(INVALID_CREDENTIALS))
            }
        }
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
