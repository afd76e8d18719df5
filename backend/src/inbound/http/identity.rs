//! Caller identity extraction from bearer tokens.
//!
//! Resolution never rejects a request: a missing header, another scheme, or
//! a token that fails verification all yield [`Caller::Anonymous`], and each
//! operation decides whether it needs an authenticated caller.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, web};
use tracing::{debug, warn};

use super::state::HttpState;
use crate::domain::Caller;
use crate::domain::ports::TokenService;

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization: Bearer <token>` header value.
fn bearer_token(header: &str) -> Option<&str> {
    let (prefix, rest) = header.split_at_checked(BEARER_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(BEARER_PREFIX) {
        return None;
    }
    let token = rest.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolve the caller for a raw header value.
pub(crate) fn resolve_caller(tokens: &dyn TokenService, header: Option<&str>) -> Caller {
    let Some(token) = header.and_then(bearer_token) else {
        return Caller::Anonymous;
    };
    match tokens.parse(token) {
        Ok(user_id) => Caller::User(user_id),
        Err(error) => {
            debug!(%error, "bearer token rejected; treating caller as anonymous");
            Caller::Anonymous
        }
    }
}

impl FromRequest for Caller {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<HttpState>>() else {
            warn!("HTTP state missing; treating caller as anonymous");
            return ready(Ok(Caller::Anonymous));
        };
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        ready(Ok(resolve_caller(state.tokens.as_ref(), header)))
    }
}
