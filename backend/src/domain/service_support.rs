//! Shared helpers for domain services: repository error mapping and profile
//! enrichment.

use std::collections::HashMap;

use tracing::error;

use crate::domain::ports::{
    CredentialError, MembershipRepositoryError, MessageRepositoryError, ProjectRepository,
    ProjectRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{Error, Project, ProjectId, UserId, UserProfile};

pub(crate) fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateEmail => Error::conflict("email is already registered"),
    }
}

pub(crate) fn map_project_repository_error(error: ProjectRepositoryError) -> Error {
    match error {
        ProjectRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("project repository unavailable: {message}"))
        }
        ProjectRepositoryError::Query { message } => {
            Error::internal(format!("project repository error: {message}"))
        }
    }
}

pub(crate) fn map_membership_repository_error(error: MembershipRepositoryError) -> Error {
    match error {
        MembershipRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("membership repository unavailable: {message}"))
        }
        MembershipRepositoryError::Query { message } => {
            Error::internal(format!("membership repository error: {message}"))
        }
        MembershipRepositoryError::Duplicate => {
            Error::conflict("an application for this project already exists")
        }
    }
}

pub(crate) fn map_message_repository_error(error: MessageRepositoryError) -> Error {
    match error {
        MessageRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("message repository unavailable: {message}"))
        }
        MessageRepositoryError::Query { message } => {
            Error::internal(format!("message repository error: {message}"))
        }
    }
}

pub(crate) fn map_credential_error(error: CredentialError) -> Error {
    error!(%error, "credential operation failed");
    Error::internal(format!("credential error: {error}"))
}

/// Load a live project or fail with `not_found`.
pub(crate) async fn load_project<P>(projects: &P, id: ProjectId) -> Result<Project, Error>
where
    P: ProjectRepository + ?Sized,
{
    projects
        .find_by_id(id)
        .await
        .map_err(map_project_repository_error)?
        .ok_or_else(|| Error::not_found(format!("project {id} not found")))
}

/// Public profile of one user, `None` when the account no longer exists.
pub(crate) async fn load_profile<U>(users: &U, id: UserId) -> Result<Option<UserProfile>, Error>
where
    U: UserRepository + ?Sized,
{
    let user = users
        .find_by_id(id)
        .await
        .map_err(map_user_repository_error)?;
    Ok(user.as_ref().map(UserProfile::from))
}

/// Public profiles keyed by id for every existing account among `ids`.
pub(crate) async fn load_profiles<U>(
    users: &U,
    ids: impl IntoIterator<Item = UserId>,
) -> Result<HashMap<UserId, UserProfile>, Error>
where
    U: UserRepository + ?Sized,
{
    let mut ids: Vec<UserId> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let found = users
        .find_by_ids(&ids)
        .await
        .map_err(map_user_repository_error)?;
    Ok(found
        .iter()
        .map(|user| (user.id, UserProfile::from(user)))
        .collect())
}
