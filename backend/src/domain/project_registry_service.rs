//! Project registry service.
//!
//! Reads are public. Creation needs an authenticated caller, who becomes the
//! permanent owner; update and delete are owner-only.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    MembershipRepository, ProjectRegistry, ProjectRepository, UserRepository,
};
use crate::domain::service_support::{
    load_profile, load_profiles, load_project, map_membership_repository_error,
    map_project_repository_error,
};
use crate::domain::{
    Caller, Error, MemberView, NewProject, Project, ProjectDetails, ProjectDraft, ProjectFilter,
    ProjectId, ProjectUpdate, ProjectView,
};

/// Registry service implementing the [`ProjectRegistry`] driving port.
#[derive(Clone)]
pub struct ProjectRegistryService<P, M, U> {
    projects: Arc<P>,
    memberships: Arc<M>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<P, M, U> ProjectRegistryService<P, M, U> {
    /// Create the registry from its repositories.
    pub fn new(projects: Arc<P>, memberships: Arc<M>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            projects,
            memberships,
            users,
            clock,
        }
    }
}

impl<P, M, U> ProjectRegistryService<P, M, U>
where
    P: ProjectRepository,
    M: MembershipRepository,
    U: UserRepository,
{
    /// Load a project the caller owns, in existence → identity → ownership order.
    async fn load_owned(&self, id: ProjectId, caller: Caller) -> Result<Project, Error> {
        let project = load_project(self.projects.as_ref(), id).await?;
        let caller_id = caller.require()?;
        if !project.is_owned_by(caller_id) {
            return Err(Error::forbidden("only the project owner can modify this project"));
        }
        Ok(project)
    }

    async fn view(&self, project: Project) -> Result<ProjectView, Error> {
        let owner = load_profile(self.users.as_ref(), project.owner_id).await?;
        Ok(ProjectView { project, owner })
    }
}

#[async_trait]
impl<P, M, U> ProjectRegistry for ProjectRegistryService<P, M, U>
where
    P: ProjectRepository,
    M: MembershipRepository,
    U: UserRepository,
{
    async fn create(&self, caller: Caller, draft: ProjectDraft) -> Result<ProjectView, Error> {
        let owner_id = caller.require()?;
        let project = self
            .projects
            .create(&NewProject {
                owner_id,
                draft,
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_project_repository_error)?;

        info!(project_id = %project.id, owner_id = %owner_id, "project created");
        self.view(project).await
    }

    async fn get(&self, id: ProjectId) -> Result<ProjectDetails, Error> {
        let project = load_project(self.projects.as_ref(), id).await?;
        let records = self
            .memberships
            .list_for_project(id)
            .await
            .map_err(map_membership_repository_error)?;

        let ids = records
            .iter()
            .map(|record| record.user_id)
            .chain(std::iter::once(project.owner_id));
        let mut profiles = load_profiles(self.users.as_ref(), ids).await?;

        let owner = profiles.get(&project.owner_id).cloned();
        let members = records
            .into_iter()
            .map(|member| MemberView {
                user: profiles.remove(&member.user_id),
                member,
            })
            .collect();

        Ok(ProjectDetails {
            project,
            owner,
            members,
        })
    }

    async fn list(&self, filter: ProjectFilter) -> Result<Vec<ProjectView>, Error> {
        let projects = self
            .projects
            .list(&filter)
            .await
            .map_err(map_project_repository_error)?;
        let profiles = load_profiles(
            self.users.as_ref(),
            projects.iter().map(|project| project.owner_id),
        )
        .await?;

        Ok(projects
            .into_iter()
            .map(|project| ProjectView {
                owner: profiles.get(&project.owner_id).cloned(),
                project,
            })
            .collect())
    }

    async fn update(
        &self,
        id: ProjectId,
        caller: Caller,
        update: ProjectUpdate,
    ) -> Result<ProjectView, Error> {
        let mut project = self.load_owned(id, caller).await?;
        project.apply_update(update, self.clock.utc());
        self.projects
            .update(&project)
            .await
            .map_err(map_project_repository_error)?;
        self.view(project).await
    }

    async fn delete(&self, id: ProjectId, caller: Caller) -> Result<(), Error> {
        let project = self.load_owned(id, caller).await?;
        self.projects
            .soft_delete(project.id, self.clock.utc())
            .await
            .map_err(map_project_repository_error)?;
        info!(project_id = %project.id, "project deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "project_registry_service_tests.rs"]
mod tests;
