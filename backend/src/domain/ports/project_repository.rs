//! Port for project persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{NewProject, Project, ProjectFilter, ProjectId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by project repository adapters.
    pub enum ProjectRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "project repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "project repository query failed: {message}",
    }
}

/// Port for reading and writing projects.
///
/// Logically deleted projects are excluded from every read.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Insert a project and return it with its assigned id.
    async fn create(&self, project: &NewProject) -> Result<Project, ProjectRepositoryError>;

    /// Find a live project by id.
    async fn find_by_id(&self, id: ProjectId) -> Result<Option<Project>, ProjectRepositoryError>;

    /// List live projects matching `filter`, ordered by id ascending.
    async fn list(&self, filter: &ProjectFilter) -> Result<Vec<Project>, ProjectRepositoryError>;

    /// Persist the mutable fields of an existing project.
    async fn update(&self, project: &Project) -> Result<(), ProjectRepositoryError>;

    /// Logically delete a project.
    async fn soft_delete(
        &self,
        id: ProjectId,
        deleted_at: DateTime<Utc>,
    ) -> Result<(), ProjectRepositoryError>;
}
