//! Caller identity threaded through every domain operation.

use super::{Error, UserId};

/// Identity resolved from an inbound request.
///
/// Resolution never fails: a missing, malformed, or expired credential yields
/// [`Caller::Anonymous`]. Operations that need an identity call
/// [`Caller::require`] at the point their check order dictates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    /// No valid credential was presented.
    Anonymous,
    /// A verified user.
    User(UserId),
}

impl Caller {
    /// Authenticated user id, if any.
    #[must_use]
    pub const fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(*id),
        }
    }

    /// Return the authenticated user or an `unauthorized` error.
    pub fn require(&self) -> Result<UserId, Error> {
        self.user_id()
            .ok_or_else(|| Error::unauthorized("authentication required"))
    }
}
