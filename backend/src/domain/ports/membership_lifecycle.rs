//! Driving port for join requests and the collaboration access predicate.

use async_trait::async_trait;

use crate::domain::{Caller, Error, MemberView, ProjectId, UserId};

/// Membership use-cases.
///
/// Every operation checks, in order: the project exists, the caller is
/// authenticated, the caller holds the required role, and finally any
/// uniqueness rule.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipLifecycle: Send + Sync {
    /// Apply to join a project. The owner may not apply; a second application
    /// for the same pair is a conflict whatever the first one's status.
    async fn apply(&self, project_id: ProjectId, caller: Caller) -> Result<MemberView, Error>;

    /// Owner accepts an application, from any prior status.
    async fn accept(
        &self,
        project_id: ProjectId,
        applicant: UserId,
        caller: Caller,
    ) -> Result<MemberView, Error>;

    /// Owner rejects an application. Rejection bars re-application.
    async fn reject(
        &self,
        project_id: ProjectId,
        applicant: UserId,
        caller: Caller,
    ) -> Result<MemberView, Error>;

    /// Whether `user_id` owns the project or holds an accepted membership.
    ///
    /// Read fresh from storage on every call. Missing projects yield `false`.
    async fn is_authorized(&self, project_id: ProjectId, user_id: UserId) -> Result<bool, Error>;
}
