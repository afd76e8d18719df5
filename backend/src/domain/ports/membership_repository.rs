//! Port for project membership persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    MembershipId, MembershipStatus, NewMembership, ProjectId, ProjectMember, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by membership repository adapters.
    pub enum MembershipRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "membership repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "membership repository query failed: {message}",
        /// A record already exists for the (project, user) pair.
        Duplicate => "membership already exists for this project and user",
    }
}

/// Port for membership records. Records are never deleted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Insert a `Pending` record.
    ///
    /// Storage enforces (project, user) uniqueness and reports
    /// [`MembershipRepositoryError::Duplicate`] to the losing writer.
    async fn create(
        &self,
        membership: &NewMembership,
    ) -> Result<ProjectMember, MembershipRepositoryError>;

    /// Find the record for a (project, user) pair.
    async fn find(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> Result<Option<ProjectMember>, MembershipRepositoryError>;

    /// Overwrite a record's status.
    async fn update_status(
        &self,
        id: MembershipId,
        status: MembershipStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), MembershipRepositoryError>;

    /// All records for a project, ordered by id ascending.
    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<ProjectMember>, MembershipRepositoryError>;
}
