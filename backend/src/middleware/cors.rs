//! Cross-origin policy for browser clients.
//!
//! An empty origin list, or one containing `*`, admits every origin. Otherwise
//! only exact matches against the configured origins are admitted.

use actix_cors::Cors;
use actix_web::http::header::{self, HeaderName};

use crate::domain::TRACE_ID_HEADER;

const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Build the CORS middleware for the configured origins.
#[must_use]
pub fn cors(allowed_origins: &[String]) -> Cors {
    let trace_header = HeaderName::from_static(TRACE_ID_HEADER);
    let base = Cors::default()
        .allowed_methods(["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers([header::AUTHORIZATION, header::CONTENT_TYPE, trace_header.clone()])
        .expose_headers([trace_header])
        .max_age(PREFLIGHT_MAX_AGE_SECS);

    if allowed_origins.is_empty() || allowed_origins.iter().any(|origin| origin == "*") {
        return base.allow_any_origin();
    }

    let origins = allowed_origins.to_vec();
    base.allowed_origin_fn(move |origin, _| {
        origins
            .iter()
            .any(|allowed| allowed.as_bytes() == origin.as_bytes())
    })
}
