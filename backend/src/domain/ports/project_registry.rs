//! Driving port for project records and owner-only mutation.

use async_trait::async_trait;

use crate::domain::{
    Caller, Error, ProjectDetails, ProjectDraft, ProjectFilter, ProjectId, ProjectUpdate,
    ProjectView,
};

/// Project use-cases.
#[async_trait]
pub trait ProjectRegistry: Send + Sync {
    /// Create a project owned by the caller.
    async fn create(&self, caller: Caller, draft: ProjectDraft) -> Result<ProjectView, Error>;

    /// Project with owner profile and membership records.
    async fn get(&self, id: ProjectId) -> Result<ProjectDetails, Error>;

    /// Projects matching `filter`, ordered by id.
    async fn list(&self, filter: ProjectFilter) -> Result<Vec<ProjectView>, Error>;

    /// Owner-only update.
    async fn update(
        &self,
        id: ProjectId,
        caller: Caller,
        update: ProjectUpdate,
    ) -> Result<ProjectView, Error>;

    /// Owner-only logical removal.
    async fn delete(&self, id: ProjectId, caller: Caller) -> Result<(), Error>;
}
