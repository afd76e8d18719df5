//! Driving port for public profiles and self-service profile edits.

use async_trait::async_trait;

use crate::domain::{Caller, Error, ProfileUpdate, UserId, UserProfile};

/// Profile use-cases.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Public profile of a user.
    async fn get_profile(&self, user_id: UserId) -> Result<UserProfile, Error>;

    /// Update the caller's own profile.
    ///
    /// Checks run in order: the user exists, the caller is authenticated, the
    /// caller is that user.
    async fn update_profile(
        &self,
        user_id: UserId,
        caller: Caller,
        update: ProfileUpdate,
    ) -> Result<UserProfile, Error>;
}
