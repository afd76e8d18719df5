//! Port for conversation message persistence.

use async_trait::async_trait;

use crate::domain::{Message, NewMessage, ProjectId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by message repository adapters.
    pub enum MessageRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "message repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "message repository query failed: {message}",
    }
}

/// Append-only message store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append a message and return it with its assigned id.
    async fn create(&self, message: &NewMessage) -> Result<Message, MessageRepositoryError>;

    /// Messages for a project ordered by `(created_at, id)` ascending.
    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<Message>, MessageRepositoryError>;
}
