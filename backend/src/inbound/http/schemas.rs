//! Response bodies for the HTTP API.
//!
//! Domain types stay free of wire concerns; these DTOs fix the snake_case
//! JSON shape and carry the OpenAPI schemas. Related users are embedded as
//! public profiles and are `null` when the account no longer exists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AuthSession, MemberView, MessageView, ProjectDetails, ProjectView, UserProfile,
};

/// Public user profile. Never includes the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "alice@x.com")]
    pub email: String,
    pub skills: String,
    pub bio: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id.as_i64(),
            name: profile.name,
            email: profile.email,
            skills: profile.skills,
            bio: profile.bio,
            created_at: profile.created_at,
        }
    }
}

/// Token and profile returned by registration and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    /// Bearer token valid for 24 hours.
    pub token: String,
    pub user: UserResponse,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.token.as_str().to_owned(),
            user: session.user.into(),
        }
    }
}

/// Membership record with the member's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MemberResponse {
    pub id: i64,
    pub project_id: i64,
    pub user_id: i64,
    pub user: Option<UserResponse>,
    /// One of `pending`, `accepted`, `rejected`.
    #[schema(example = "pending")]
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MemberView> for MemberResponse {
    fn from(view: MemberView) -> Self {
        let MemberView { member, user } = view;
        Self {
            id: member.id.as_i64(),
            project_id: member.project_id.as_i64(),
            user_id: member.user_id.as_i64(),
            user: user.map(UserResponse::from),
            status: member.status.as_str().to_owned(),
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}

/// Project with its owner's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProjectResponse {
    pub id: i64,
    pub owner_id: i64,
    pub owner: Option<UserResponse>,
    #[schema(example = "Rust CLI")]
    pub title: String,
    pub description: String,
    #[schema(example = "web")]
    pub category: String,
    #[schema(example = "beginner")]
    pub level: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Present on single-project reads only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<MemberResponse>>,
}

impl From<ProjectView> for ProjectResponse {
    fn from(view: ProjectView) -> Self {
        let ProjectView { project, owner } = view;
        Self {
            id: project.id.as_i64(),
            owner_id: project.owner_id.as_i64(),
            owner: owner.map(UserResponse::from),
            title: project.title.as_str().to_owned(),
            description: project.description,
            category: project.category,
            level: project.level,
            created_at: project.created_at,
            updated_at: project.updated_at,
            members: None,
        }
    }
}

impl From<ProjectDetails> for ProjectResponse {
    fn from(details: ProjectDetails) -> Self {
        let ProjectDetails {
            project,
            owner,
            members,
        } = details;
        Self {
            members: Some(members.into_iter().map(MemberResponse::from).collect()),
            ..Self::from(ProjectView { project, owner })
        }
    }
}

/// Conversation message with its author's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub id: i64,
    pub project_id: i64,
    /// Author id.
    pub user_id: i64,
    pub user: Option<UserResponse>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<MessageView> for MessageResponse {
    fn from(view: MessageView) -> Self {
        let MessageView { message, author } = view;
        Self {
            id: message.id.as_i64(),
            project_id: message.project_id.as_i64(),
            user_id: message.author_id.as_i64(),
            user: author.map(UserResponse::from),
            content: message.content.as_str().to_owned(),
            created_at: message.created_at,
        }
    }
}
