//! Internal Diesel row structs and their conversions to domain types.
//!
//! Rows never leave the persistence layer. Conversions re-validate stored
//! values; a failure means the database holds data the domain rejects and is
//! reported as a query error by the calling repository.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{messages, project_members, projects, users};
use crate::domain::{
    DisplayName, Email, MembershipId, MembershipStatus, Message, MessageContent, MessageId,
    Project, ProjectId, ProjectMember, ProjectTitle, User, UserId,
};

/// Reason a stored row could not be turned into a domain value.
pub(crate) type RowConversionError = String;

fn invalid(column: &str, err: impl std::fmt::Display) -> RowConversionError {
    format!("invalid stored {column}: {err}")
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub skills: String,
    pub bio: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RowConversionError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(row.id).map_err(|err| invalid("users.id", err))?,
            name: DisplayName::new(&row.name).map_err(|err| invalid("users.name", err))?,
            email: Email::new(&row.email).map_err(|err| invalid("users.email", err))?,
            password_hash: row.password_hash,
            skills: row.skills,
            bio: row.bio,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserProfileChangeset<'a> {
    pub name: &'a str,
    pub skills: &'a str,
    pub bio: &'a str,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProjectRow {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub level: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProjectRow> for Project {
    type Error = RowConversionError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProjectId::new(row.id).map_err(|err| invalid("projects.id", err))?,
            owner_id: UserId::new(row.owner_id).map_err(|err| invalid("projects.owner_id", err))?,
            title: ProjectTitle::new(&row.title).map_err(|err| invalid("projects.title", err))?,
            description: row.description,
            category: row.category,
            level: row.level,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub(crate) struct NewProjectRow<'a> {
    pub owner_id: i64,
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub level: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = projects)]
pub(crate) struct ProjectChangeset<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub level: &'a str,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Memberships
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = project_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MemberRow {
    pub id: i64,
    pub project_id: i64,
    pub user_id: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<MemberRow> for ProjectMember {
    type Error = RowConversionError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MembershipId::new(row.id).map_err(|err| invalid("project_members.id", err))?,
            project_id: ProjectId::new(row.project_id)
                .map_err(|err| invalid("project_members.project_id", err))?,
            user_id: UserId::new(row.user_id)
                .map_err(|err| invalid("project_members.user_id", err))?,
            status: row
                .status
                .parse::<MembershipStatus>()
                .map_err(|err| invalid("project_members.status", err))?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = project_members)]
pub(crate) struct NewMemberRow {
    pub project_id: i64,
    pub user_id: i64,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MessageRow {
    pub id: i64,
    pub project_id: i64,
    pub author_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<MessageRow> for Message {
    type Error = RowConversionError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MessageId::new(row.id).map_err(|err| invalid("messages.id", err))?,
            project_id: ProjectId::new(row.project_id)
                .map_err(|err| invalid("messages.project_id", err))?,
            author_id: UserId::new(row.author_id)
                .map_err(|err| invalid("messages.author_id", err))?,
            content: MessageContent::new(row.content)
                .map_err(|err| invalid("messages.content", err))?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = messages)]
pub(crate) struct NewMessageRow<'a> {
    pub project_id: i64,
    pub author_id: i64,
    pub content: &'a str,
    pub created_at: DateTime<Utc>,
}
