//! Positive integer identifiers for stored records.
//!
//! Storage assigns identifiers; callers only ever hold values that were
//! validated as strictly positive.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation error for record identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdValidationError {
    /// Value was zero or negative.
    NotPositive(i64),
    /// Value was not a decimal integer.
    NotNumeric,
}

impl fmt::Display for IdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPositive(value) => write!(f, "identifier must be positive, got {value}"),
            Self::NotNumeric => write!(f, "identifier must be a decimal integer"),
        }
    }
}

impl std::error::Error for IdValidationError {}

macro_rules! define_record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Validate and wrap a raw identifier.
            pub fn new(value: i64) -> Result<Self, IdValidationError> {
                if value <= 0 {
                    return Err(IdValidationError::NotPositive(value));
                }
                Ok(Self(value))
            }

            /// Raw integer value.
            #[must_use]
            pub const fn as_i64(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.is_empty() || !s.bytes().all(|byte| byte.is_ascii_digit()) {
                    return Err(IdValidationError::NotNumeric);
                }
                let value = s.parse::<i64>().map_err(|_| IdValidationError::NotNumeric)?;
                Self::new(value)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = IdValidationError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_record_id!(
    /// Identifier of a registered user.
    UserId
);
define_record_id!(
    /// Identifier of a project.
    ProjectId
);
define_record_id!(
    /// Identifier of a membership record.
    MembershipId
);
define_record_id!(
    /// Identifier of a conversation message.
    MessageId
);
