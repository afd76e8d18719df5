//! Public profiles and self-only profile updates.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{UserDirectory, UserRepository};
use crate::domain::service_support::map_user_repository_error;
use crate::domain::{Caller, Error, ProfileUpdate, User, UserId, UserProfile};

/// Directory service implementing the [`UserDirectory`] driving port.
#[derive(Clone)]
pub struct UserDirectoryService<U> {
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U> UserDirectoryService<U> {
    /// Create a directory service over the user repository.
    pub fn new(users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

impl<U> UserDirectoryService<U>
where
    U: UserRepository,
{
    async fn load(&self, user_id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))
    }
}

#[async_trait]
impl<U> UserDirectory for UserDirectoryService<U>
where
    U: UserRepository,
{
    async fn get_profile(&self, user_id: UserId) -> Result<UserProfile, Error> {
        Ok(self.load(user_id).await?.profile())
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        caller: Caller,
        update: ProfileUpdate,
    ) -> Result<UserProfile, Error> {
        let mut user = self.load(user_id).await?;
        let caller_id = caller.require()?;
        if caller_id != user_id {
            return Err(Error::forbidden("you can only update your own profile"));
        }

        user.apply_update(update, self.clock.utc());
        self.users
            .update_profile(&user)
            .await
            .map_err(map_user_repository_error)?;
        Ok(user.profile())
    }
}
