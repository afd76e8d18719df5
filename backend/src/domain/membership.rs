//! Project membership records and the collaboration access predicate.
//!
//! A user moves from having no record, to `Pending` on application, to
//! `Accepted` or `Rejected` by the owner's decision. The owner never holds a
//! record for their own project; ownership alone grants access.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::{MembershipId, Project, ProjectId, UserId, UserProfile};

/// Status of a join request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MembershipStatus {
    /// Awaiting the owner's decision.
    Pending,
    /// Collaborator with conversation access.
    Accepted,
    /// Declined; the applicant may not apply again.
    Rejected,
}

impl MembershipStatus {
    /// Stable storage and wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    /// Whether this status grants conversation access.
    #[must_use]
    pub const fn grants_access(self) -> bool {
        match self {
            Self::Accepted => true,
            Self::Pending | Self::Rejected => false,
        }
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when a stored status label is unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMembershipStatus(pub String);

impl fmt::Display for UnknownMembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown membership status: {}", self.0)
    }
}

impl std::error::Error for UnknownMembershipStatus {}

impl FromStr for MembershipStatus {
    type Err = UnknownMembershipStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(UnknownMembershipStatus(other.to_owned())),
        }
    }
}

/// Stored membership record; at most one per (project, user) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMember {
    pub id: MembershipId,
    pub project_id: ProjectId,
    pub user_id: UserId,
    pub status: MembershipStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Application handed to storage; new records always start `Pending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMembership {
    pub project_id: ProjectId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Membership record enriched with the member's public profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberView {
    pub member: ProjectMember,
    pub user: Option<UserProfile>,
}

/// Whether `user` may read or post in `project`'s conversation.
///
/// True for the owner regardless of records, otherwise only for an
/// `Accepted` record belonging to this project and user.
#[must_use]
pub fn grants_access(project: &Project, user: UserId, membership: Option<&ProjectMember>) -> bool {
    if project.is_owned_by(user) {
        return true;
    }
    membership.is_some_and(|record| {
        record.project_id == project.id && record.user_id == user && record.status.grants_access()
    })
}
