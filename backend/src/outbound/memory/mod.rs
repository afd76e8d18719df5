//! In-memory implementation of every repository port.
//!
//! All tables live behind one `tokio::sync::RwLock`, so each mutation sees and
//! updates a consistent snapshot and uniqueness rules are checked under the
//! same write lock that inserts the row. State is lost on restart; the store
//! backs local runs without a database and the HTTP integration tests.
//!
//! Soft-deleted rows stay in their tables but are invisible to every read.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::ports::{
    MembershipRepository, MembershipRepositoryError, MessageRepository, MessageRepositoryError,
    ProjectRepository, ProjectRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{
    Email, IdValidationError, MembershipId, MembershipStatus, Message, MessageId, NewMembership,
    NewMessage, NewProject, NewUser, Project, ProjectFilter, ProjectId, ProjectMember, User,
    UserId,
};

#[derive(Debug, Clone)]
struct Row<T> {
    record: T,
    deleted_at: Option<DateTime<Utc>>,
}

impl<T> Row<T> {
    fn live(record: T) -> Self {
        Self {
            record,
            deleted_at: None,
        }
    }

    fn visible(&self) -> Option<&T> {
        self.deleted_at.is_none().then_some(&self.record)
    }
}

/// Monotonic id sequence mirroring a database identity column.
#[derive(Debug, Default)]
struct Sequence(i64);

impl Sequence {
    fn next<T>(&mut self, wrap: impl FnOnce(i64) -> Result<T, IdValidationError>) -> Result<T, IdValidationError> {
        self.0 += 1;
        wrap(self.0)
    }
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, Row<User>>,
    projects: BTreeMap<ProjectId, Row<Project>>,
    memberships: BTreeMap<MembershipId, ProjectMember>,
    messages: BTreeMap<MessageId, Message>,
    user_ids: Sequence,
    project_ids: Sequence,
    membership_ids: Sequence,
    message_ids: Sequence,
}

/// Process-local store shared by all services.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a user account as deleted. Nothing in the service layer deletes
    /// accounts; this exists so callers can exercise the missing-profile paths.
    pub async fn soft_delete_user(&self, id: UserId, at: DateTime<Utc>) -> bool {
        let mut tables = self.tables.write().await;
        match tables.users.get_mut(&id) {
            Some(row) if row.deleted_at.is_none() => {
                row.deleted_at = Some(at);
                true
            }
            _ => false,
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut tables = self.tables.write().await;
        let taken = tables
            .users
            .values()
            .filter_map(Row::visible)
            .any(|existing| existing.email == user.email);
        if taken {
            return Err(UserRepositoryError::duplicate_email());
        }

        let id = tables
            .user_ids
            .next(UserId::new)
            .map_err(|err| UserRepositoryError::query(err.to_string()))?;
        let record = User {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            skills: String::new(),
            bio: String::new(),
            created_at: user.created_at,
            updated_at: user.created_at,
        };
        tables.users.insert(id, Row::live(record.clone()));
        Ok(record)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).and_then(Row::visible).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .filter_map(Row::visible)
            .find(|user| &user.email == email)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserRepositoryError> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.users.get(id).and_then(Row::visible))
            .cloned()
            .collect())
    }

    async fn update_profile(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut tables = self.tables.write().await;
        if let Some(row) = tables.users.get_mut(&user.id).filter(|row| row.deleted_at.is_none()) {
            row.record.name = user.name.clone();
            row.record.skills = user.skills.clone();
            row.record.bio = user.bio.clone();
            row.record.updated_at = user.updated_at;
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn create(&self, project: &NewProject) -> Result<Project, ProjectRepositoryError> {
        let mut tables = self.tables.write().await;
        let id = tables
            .project_ids
            .next(ProjectId::new)
            .map_err(|err| ProjectRepositoryError::query(err.to_string()))?;
        let draft = project.draft.clone();
        let record = Project {
            id,
            owner_id: project.owner_id,
            title: draft.title,
            description: draft.description,
            category: draft.category,
            level: draft.level,
            created_at: project.created_at,
            updated_at: project.created_at,
        };
        tables.projects.insert(id, Row::live(record.clone()));
        Ok(record)
    }

    async fn find_by_id(&self, id: ProjectId) -> Result<Option<Project>, ProjectRepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.projects.get(&id).and_then(Row::visible).cloned())
    }

    async fn list(&self, filter: &ProjectFilter) -> Result<Vec<Project>, ProjectRepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .projects
            .values()
            .filter_map(Row::visible)
            .filter(|project| filter.matches(project))
            .cloned()
            .collect())
    }

    async fn update(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let mut tables = self.tables.write().await;
        if let Some(row) = tables
            .projects
            .get_mut(&project.id)
            .filter(|row| row.deleted_at.is_none())
        {
            row.record.title = project.title.clone();
            row.record.description = project.description.clone();
            row.record.category = project.category.clone();
            row.record.level = project.level.clone();
            row.record.updated_at = project.updated_at;
        }
        Ok(())
    }

    async fn soft_delete(
        &self,
        id: ProjectId,
        deleted_at: DateTime<Utc>,
    ) -> Result<(), ProjectRepositoryError> {
        let mut tables = self.tables.write().await;
        if let Some(row) = tables.projects.get_mut(&id) {
            row.deleted_at.get_or_insert(deleted_at);
        }
        Ok(())
    }
}

#[async_trait]
impl MembershipRepository for InMemoryStore {
    async fn create(
        &self,
        membership: &NewMembership,
    ) -> Result<ProjectMember, MembershipRepositoryError> {
        let mut tables = self.tables.write().await;
        let exists = tables.memberships.values().any(|record| {
            record.project_id == membership.project_id && record.user_id == membership.user_id
        });
        if exists {
            return Err(MembershipRepositoryError::duplicate());
        }

        let id = tables
            .membership_ids
            .next(MembershipId::new)
            .map_err(|err| MembershipRepositoryError::query(err.to_string()))?;
        let record = ProjectMember {
            id,
            project_id: membership.project_id,
            user_id: membership.user_id,
            status: MembershipStatus::Pending,
            created_at: membership.created_at,
            updated_at: membership.created_at,
        };
        tables.memberships.insert(id, record.clone());
        Ok(record)
    }

    async fn find(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> Result<Option<ProjectMember>, MembershipRepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .memberships
            .values()
            .find(|record| record.project_id == project_id && record.user_id == user_id)
            .cloned())
    }

    async fn update_status(
        &self,
        id: MembershipId,
        status: MembershipStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), MembershipRepositoryError> {
        let mut tables = self.tables.write().await;
        if let Some(record) = tables.memberships.get_mut(&id) {
            record.status = status;
            record.updated_at = updated_at;
        }
        Ok(())
    }

    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<ProjectMember>, MembershipRepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .memberships
            .values()
            .filter(|record| record.project_id == project_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MessageRepository for InMemoryStore {
    async fn create(&self, message: &NewMessage) -> Result<Message, MessageRepositoryError> {
        let mut tables = self.tables.write().await;
        let id = tables
            .message_ids
            .next(MessageId::new)
            .map_err(|err| MessageRepositoryError::query(err.to_string()))?;
        let record = Message {
            id,
            project_id: message.project_id,
            author_id: message.author_id,
            content: message.content.clone(),
            created_at: message.created_at,
        };
        tables.messages.insert(id, record.clone());
        Ok(record)
    }

    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<Message>, MessageRepositoryError> {
        let tables = self.tables.read().await;
        let mut messages: Vec<Message> = tables
            .messages
            .values()
            .filter(|message| message.project_id == project_id)
            .cloned()
            .collect();
        messages.sort_by_key(|message| (message.created_at, message.id));
        Ok(messages)
    }
}
