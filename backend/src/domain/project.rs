//! Projects, their drafts and updates, and list filters.

use std::fmt;

use chrono::{DateTime, Utc};

use super::{MemberView, ProjectId, UserId, UserProfile};

/// Validation errors for project payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    /// Title was empty.
    EmptyTitle,
}

impl fmt::Display for ProjectValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
        }
    }
}

impl std::error::Error for ProjectValidationError {}

/// Non-empty project title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTitle(String);

impl ProjectTitle {
    /// Validate a title. The text is stored exactly as supplied.
    pub fn new(raw: impl Into<String>) -> Result<Self, ProjectValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ProjectValidationError::EmptyTitle);
        }
        Ok(Self(raw))
    }

    /// Borrow the title.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Stored project. The owner is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub owner_id: UserId,
    pub title: ProjectTitle,
    pub description: String,
    pub category: String,
    /// Open-ended difficulty label such as `beginner`, `middle`, or `expert`.
    pub level: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Whether `user` owns this project.
    #[must_use]
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner_id == user
    }

    /// Apply an owner's update.
    pub fn apply_update(&mut self, update: ProjectUpdate, now: DateTime<Utc>) {
        let ProjectUpdate {
            title,
            description,
            category,
            level,
        } = update;
        if let Some(title) = title {
            self.title = title;
        }
        self.description = description;
        self.category = category;
        self.level = level;
        self.updated_at = now;
    }
}

/// Caller-supplied fields for a new project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: ProjectTitle,
    pub description: String,
    pub category: String,
    pub level: String,
}

impl ProjectDraft {
    /// Validate raw request fields. Only the title is constrained.
    pub fn try_from_parts(
        title: &str,
        description: impl Into<String>,
        category: impl Into<String>,
        level: impl Into<String>,
    ) -> Result<Self, ProjectValidationError> {
        Ok(Self {
            title: ProjectTitle::new(title)?,
            description: description.into(),
            category: category.into(),
            level: level.into(),
        })
    }
}

/// Project data handed to storage on creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub owner_id: UserId,
    pub draft: ProjectDraft,
    pub created_at: DateTime<Utc>,
}

/// Owner update. An empty title keeps the current one; the other fields are
/// always overwritten, including with empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectUpdate {
    pub title: Option<ProjectTitle>,
    pub description: String,
    pub category: String,
    pub level: String,
}

impl ProjectUpdate {
    /// Build an update from raw request fields.
    pub fn from_parts(
        title: &str,
        description: impl Into<String>,
        category: impl Into<String>,
        level: impl Into<String>,
    ) -> Self {
        Self {
            title: ProjectTitle::new(title).ok(),
            description: description.into(),
            category: category.into(),
            level: level.into(),
        }
    }
}

/// Exact-match filter for project listings. Empty values do not restrict.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectFilter {
    category: Option<String>,
    level: Option<String>,
}

impl ProjectFilter {
    /// Build a filter, treating empty values as absent.
    pub fn new(category: Option<String>, level: Option<String>) -> Self {
        let normalise = |value: Option<String>| value.filter(|v| !v.is_empty());
        Self {
            category: normalise(category),
            level: normalise(level),
        }
    }

    /// Category restriction, if any.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Level restriction, if any.
    pub fn level(&self) -> Option<&str> {
        self.level.as_deref()
    }

    /// Whether `project` passes the filter.
    #[must_use]
    pub fn matches(&self, project: &Project) -> bool {
        self.category().is_none_or(|c| project.category == c)
            && self.level().is_none_or(|l| project.level == l)
    }
}

/// Project enriched with its owner's public profile.
///
/// `owner` is `None` when the owner account has been removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectView {
    pub project: Project,
    pub owner: Option<UserProfile>,
}

/// Project with owner and membership records, as returned by a detail read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetails {
    pub project: Project,
    pub owner: Option<UserProfile>,
    pub members: Vec<MemberView>,
}
