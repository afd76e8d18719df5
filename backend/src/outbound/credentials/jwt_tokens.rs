//! HS256 bearer tokens implementing the [`TokenService`] port.
//!
//! Claims carry the numeric user id together with issue and expiry times in
//! Unix seconds. Expiry is checked against the injected clock rather than the
//! system time so tests can move time forward.

use std::fmt;
use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ports::{CredentialError, TokenService};
use crate::domain::{AccessToken, UserId};

/// Token lifetime applied at issue time.
pub const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    user_id: i64,
    iat: i64,
    exp: i64,
}

/// Signs and verifies tokens with a shared secret.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl JwtTokenService {
    /// Create a service signing with `secret` and the default 24 hour lifetime.
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: Duration::hours(TOKEN_TTL_HOURS),
            clock,
        }
    }

    /// Override the token lifetime.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: UserId) -> Result<AccessToken, CredentialError> {
        let now = self.clock.utc();
        let claims = Claims {
            user_id: user_id.as_i64(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| CredentialError::signing(err.to_string()))
    }

    fn parse(&self, token: &str) -> Result<UserId, CredentialError> {
        let claims = decode::<Claims>(token, &self.decoding, &Self::validation())
            .map_err(|err| {
                debug!(error = %err, "token rejected");
                CredentialError::invalid_token()
            })?
            .claims;
        if claims.exp <= self.clock.utc().timestamp() {
            debug!(user_id = claims.user_id, "token expired");
            return Err(CredentialError::invalid_token());
        }
        UserId::new(claims.user_id).map_err(|_| CredentialError::invalid_token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local, TimeZone, Utc};
    use rstest::rstest;
    use std::sync::Mutex;

    struct MutableClock(Mutex<DateTime<Utc>>);

    impl MutableClock {
        fn new() -> Self {
            let start = Utc
                .with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
                .single()
                .expect("valid timestamp");
            Self(Mutex::new(start))
        }

        fn advance(&self, by: Duration) {
            let mut now = self.0.lock().expect("clock lock");
            *now += by;
        }
    }

    impl Clock for MutableClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.0.lock().expect("clock lock")
        }
    }

    fn user(id: i64) -> UserId {
        UserId::new(id).expect("valid user id")
    }

    #[test]
    fn issued_token_identifies_user() {
        let service = JwtTokenService::new(b"secret", Arc::new(MutableClock::new()));
        let token = service.issue(user(42)).expect("issue");

        assert_eq!(service.parse(token.as_str()).expect("parse"), user(42));
    }

    #[rstest]
    #[case(Duration::hours(23), true)]
    #[case(Duration::hours(24), false)]
    #[case(Duration::days(3), false)]
    fn tokens_expire_after_a_day(#[case] elapsed: Duration, #[case] valid: bool) {
        let clock = Arc::new(MutableClock::new());
        let service = JwtTokenService::new(b"secret", clock.clone());
        let token = service.issue(user(1)).expect("issue");

        clock.advance(elapsed);

        assert_eq!(service.parse(token.as_str()).is_ok(), valid);
    }

    #[test]
    fn token_signed_with_another_secret_is_invalid() {
        let clock: Arc<dyn Clock> = Arc::new(MutableClock::new());
        let issuer = JwtTokenService::new(b"first", clock.clone());
        let verifier = JwtTokenService::new(b"second", clock);
        let token = issuer.issue(user(1)).expect("issue");

        assert_eq!(
            verifier.parse(token.as_str()),
            Err(CredentialError::invalid_token())
        );
    }

    #[rstest]
    #[case("")]
    #[case("garbage")]
    #[case("a.b.c")]
    fn malformed_tokens_are_invalid(#[case] raw: &str) {
        let service = JwtTokenService::new(b"secret", Arc::new(MutableClock::new()));
        assert_eq!(service.parse(raw), Err(CredentialError::invalid_token()));
    }

    #[test]
    fn non_positive_user_ids_are_invalid() {
        let clock = MutableClock::new();
        let now = clock.utc().timestamp();
        let claims = Claims {
            user_id: 0,
            iat: now,
            exp: now + 60,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .expect("encode");
        let service = JwtTokenService::new(b"secret", Arc::new(clock));

        assert_eq!(service.parse(&token), Err(CredentialError::invalid_token()));
    }
}
