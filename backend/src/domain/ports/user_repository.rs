//! Port for user account persistence.

use async_trait::async_trait;

use crate::domain::{Email, NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses the email address.
        DuplicateEmail => "email address is already registered",
    }
}

/// Port for reading and writing user accounts.
///
/// Soft-deleted accounts are invisible to every read.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account and return it with its assigned id.
    ///
    /// Fails with [`UserRepositoryError::DuplicateEmail`] when the address is
    /// taken, including when a concurrent registration wins the race.
    async fn create(&self, user: &NewUser) -> Result<User, UserRepositoryError>;

    /// Find an account by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Find an account by normalised email address.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError>;

    /// Load every existing account among `ids`, in no particular order.
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserRepositoryError>;

    /// Persist name, skills, bio, and `updated_at` of an existing account.
    async fn update_profile(&self, user: &User) -> Result<(), UserRepositoryError>;
}
