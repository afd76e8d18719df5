//! User accounts and their public projection.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use super::UserId;

/// Validation errors for user-supplied account fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Display name was empty.
    EmptyName,
    /// Email address was blank.
    EmptyEmail,
    /// Email address did not look like `local@domain.tld`.
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Human readable name shown alongside a user's activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a display name, kept exactly as supplied.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self(raw))
    }

    /// Borrow the name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

static EMAIL_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn email_regex() -> Option<&'static Regex> {
    EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

/// Email address used as the login identity.
///
/// Addresses are compared case-insensitively by storing them lowercased.
///
/// # Examples
/// ```
/// use backend::domain::Email;
///
/// let email = Email::new(" Alice@X.com ").unwrap();
/// assert_eq!(email.as_str(), "alice@x.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validate and normalise an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        let valid = email_regex().is_some_and(|re| re.is_match(trimmed));
        if !valid {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// Borrow the normalised address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored user account.
///
/// Email and password hash never change after registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: DisplayName,
    pub email: Email,
    pub password_hash: String,
    pub skills: String,
    pub bio: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Apply a self-service profile update.
    pub fn apply_update(&mut self, update: ProfileUpdate, now: DateTime<Utc>) {
        let ProfileUpdate { name, skills, bio } = update;
        if let Some(name) = name {
            self.name = name;
        }
        self.skills = skills;
        self.bio = bio;
        self.updated_at = now;
    }

    /// Public view of the account.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile::from(self)
    }
}

/// Public projection of a user; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub skills: String,
    pub bio: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.as_str().to_owned(),
            email: user.email.as_str().to_owned(),
            skills: user.skills.clone(),
            bio: user.bio.clone(),
            created_at: user.created_at,
        }
    }
}

/// Account data handed to storage on registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: DisplayName,
    pub email: Email,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Profile fields a user may change about themself.
///
/// An empty name leaves the stored name untouched while skills and bio are
/// always overwritten, including with empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileUpdate {
    pub name: Option<DisplayName>,
    pub skills: String,
    pub bio: String,
}

impl ProfileUpdate {
    /// Build an update from raw request fields.
    pub fn from_parts(name: &str, skills: impl Into<String>, bio: impl Into<String>) -> Self {
        Self {
            name: DisplayName::new(name).ok(),
            skills: skills.into(),
            bio: bio.into(),
        }
    }
}
