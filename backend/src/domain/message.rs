//! Immutable conversation messages attached to a project.

use std::fmt;

use chrono::{DateTime, Utc};

use super::{MessageId, ProjectId, UserId, UserProfile};

/// Validation errors for message payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageValidationError {
    /// Content was empty.
    EmptyContent,
}

impl fmt::Display for MessageValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "content must not be empty"),
        }
    }
}

impl std::error::Error for MessageValidationError {}

/// Non-empty message body, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    /// Validate message content.
    pub fn new(raw: impl Into<String>) -> Result<Self, MessageValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(MessageValidationError::EmptyContent);
        }
        Ok(Self(raw))
    }

    /// Borrow the content.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Stored message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub project_id: ProjectId,
    pub author_id: UserId,
    pub content: MessageContent,
    pub created_at: DateTime<Utc>,
}

/// Message handed to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub project_id: ProjectId,
    pub author_id: UserId,
    pub content: MessageContent,
    pub created_at: DateTime<Utc>,
}

/// Message enriched with its author's public profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub message: Message,
    pub author: Option<UserProfile>,
}
