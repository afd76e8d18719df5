//! Authentication primitives: login credentials, registrations, and tokens.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::{DisplayName, Email, UserProfile, UserValidationError};

/// Minimum accepted password length, in characters.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Domain error returned when authentication payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    /// Name, email, or address format problems.
    User(UserValidationError),
    /// Password was empty.
    EmptyPassword,
    /// Password shorter than [`PASSWORD_MIN_LENGTH`].
    PasswordTooShort { min: usize },
}

impl AuthValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::User(UserValidationError::EmptyName) => "name",
            Self::User(UserValidationError::EmptyEmail | UserValidationError::InvalidEmail) => {
                "email"
            }
            Self::EmptyPassword | Self::PasswordTooShort { .. } => "password",
        }
    }
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(inner) => write!(f, "{inner}"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for AuthValidationError {}

impl From<UserValidationError> for AuthValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::User(value)
    }
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is a normalised address.
/// - `password` is non-empty but retains caller-provided whitespace.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("alice@x.com", "secret1").unwrap();
/// assert_eq!(creds.email().as_str(), "alice@x.com");
/// assert_eq!(creds.password(), "secret1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        let email = Email::new(email)?;
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Address used for the account lookup.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: DisplayName,
    email: Email,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw registration inputs in field order: name, email, password.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, AuthValidationError> {
        let name = DisplayName::new(name)?;
        let email = Email::new(email)?;
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        if password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(AuthValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LENGTH,
            });
        }
        Ok(Self {
            name,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Requested display name.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Requested login address.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Plaintext password, hashed before storage.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Signed bearer token proving a user's identity.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an encoded token.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded token string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// Result of a successful registration or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: AccessToken,
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", AuthValidationError::User(UserValidationError::EmptyEmail))]
    #[case("nope", "pw", AuthValidationError::User(UserValidationError::InvalidEmail))]
    #[case("alice@x.com", "", AuthValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: AuthValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn login_password_keeps_whitespace() {
        let creds = LoginCredentials::try_from_parts("alice@x.com", " pw ").expect("valid");
        assert_eq!(creds.password(), " pw ");
    }

    #[rstest]
    #[case("", "a@x.com", "secret1", "name")]
    #[case("Alice", "bad", "secret1", "email")]
    #[case("Alice", "a@x.com", "", "password")]
    #[case("Alice", "a@x.com", "12345", "password")]
    fn registration_reports_offending_field(
        #[case] name: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] field: &str,
    ) {
        let err = Registration::try_from_parts(name, email, password)
            .expect_err("invalid registration");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn registration_accepts_six_character_passwords() {
        let registration =
            Registration::try_from_parts(" Alice ", "alice@x.com", "secret").expect("valid");
        assert_eq!(registration.name().as_str(), "Alice");
        assert_eq!(registration.password(), "secret");
    }

    #[rstest]
    fn access_token_debug_is_redacted() {
        let token = AccessToken::new("header.payload.signature");
        assert_eq!(format!("{token:?}"), "AccessToken(..)");
    }
}
