//! Driving port for project conversations.

use async_trait::async_trait;

use crate::domain::{Caller, Error, MessageContent, MessageView, ProjectId};

/// Conversation use-cases, open only to the owner and accepted members.
#[async_trait]
pub trait ConversationGate: Send + Sync {
    /// Append a message stamped with the current time.
    async fn post(
        &self,
        project_id: ProjectId,
        caller: Caller,
        content: MessageContent,
    ) -> Result<MessageView, Error>;

    /// All messages in chronological order.
    async fn list(&self, project_id: ProjectId, caller: Caller) -> Result<Vec<MessageView>, Error>;
}
