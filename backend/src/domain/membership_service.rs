//! Membership lifecycle service.
//!
//! Applications are created `Pending`. Only the project owner moves them to
//! `Accepted` or `Rejected`, and may do so from any prior status. Access to a
//! project's conversation is re-derived from storage on each check.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    MembershipLifecycle, MembershipRepository, ProjectRepository, UserRepository,
};
use crate::domain::service_support::{
    load_profile, load_project, map_membership_repository_error, map_project_repository_error,
};
use crate::domain::{
    Caller, Error, MemberView, MembershipStatus, NewMembership, ProjectId, ProjectMember, UserId,
    grants_access,
};

/// Lifecycle service implementing the [`MembershipLifecycle`] driving port.
#[derive(Clone)]
pub struct MembershipService<P, M, U> {
    projects: Arc<P>,
    memberships: Arc<M>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<P, M, U> MembershipService<P, M, U> {
    /// Create the service from its repositories.
    pub fn new(projects: Arc<P>, memberships: Arc<M>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            projects,
            memberships,
            users,
            clock,
        }
    }
}

impl<P, M, U> MembershipService<P, M, U>
where
    P: ProjectRepository,
    M: MembershipRepository,
    U: UserRepository,
{
    async fn find(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> Result<Option<ProjectMember>, Error> {
        self.memberships
            .find(project_id, user_id)
            .await
            .map_err(map_membership_repository_error)
    }

    async fn view(&self, member: ProjectMember) -> Result<MemberView, Error> {
        let user = load_profile(self.users.as_ref(), member.user_id).await?;
        Ok(MemberView { member, user })
    }

    /// Owner decision on an existing application.
    async fn transition(
        &self,
        project_id: ProjectId,
        applicant: UserId,
        caller: Caller,
        status: MembershipStatus,
    ) -> Result<MemberView, Error> {
        let project = load_project(self.projects.as_ref(), project_id).await?;
        let caller_id = caller.require()?;
        if !project.is_owned_by(caller_id) {
            return Err(Error::forbidden(
                "only the project owner can manage applications",
            ));
        }
        let mut member = self
            .find(project_id, applicant)
            .await?
            .ok_or_else(|| Error::not_found("application not found"))?;

        let now = self.clock.utc();
        self.memberships
            .update_status(member.id, status, now)
            .await
            .map_err(map_membership_repository_error)?;
        info!(
            project_id = %project_id,
            user_id = %applicant,
            from = %member.status,
            to = %status,
            "membership status changed"
        );
        member.status = status;
        member.updated_at = now;
        self.view(member).await
    }
}

#[async_trait]
impl<P, M, U> MembershipLifecycle for MembershipService<P, M, U>
where
    P: ProjectRepository,
    M: MembershipRepository,
    U: UserRepository,
{
    async fn apply(&self, project_id: ProjectId, caller: Caller) -> Result<MemberView, Error> {
        let project = load_project(self.projects.as_ref(), project_id).await?;
        let user_id = caller.require()?;
        if project.is_owned_by(user_id) {
            return Err(Error::invalid_request(
                "project owner cannot apply to their own project",
            ));
        }
        if self.find(project_id, user_id).await?.is_some() {
            return Err(Error::conflict("you have already applied to this project"));
        }

        let member = self
            .memberships
            .create(&NewMembership {
                project_id,
                user_id,
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_membership_repository_error)?;
        info!(project_id = %project_id, user_id = %user_id, "membership requested");
        self.view(member).await
    }

    async fn accept(
        &self,
        project_id: ProjectId,
        applicant: UserId,
        caller: Caller,
    ) -> Result<MemberView, Error> {
        self.transition(project_id, applicant, caller, MembershipStatus::Accepted)
            .await
    }

    async fn reject(
        &self,
        project_id: ProjectId,
        applicant: UserId,
        caller: Caller,
    ) -> Result<MemberView, Error> {
        self.transition(project_id, applicant, caller, MembershipStatus::Rejected)
            .await
    }

    async fn is_authorized(&self, project_id: ProjectId, user_id: UserId) -> Result<bool, Error> {
        let Some(project) = self
            .projects
            .find_by_id(project_id)
            .await
            .map_err(map_project_repository_error)?
        else {
            return Ok(false);
        };
        if project.is_owned_by(user_id) {
            return Ok(true);
        }
        let member = self.find(project_id, user_id).await?;
        Ok(grants_access(&project, user_id, member.as_ref()))
    }
}

#[cfg(test)]
#[path = "membership_service_tests.rs"]
mod tests;
