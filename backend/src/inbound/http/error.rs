//! HTTP mapping for domain errors.
//!
//! The domain error type stays HTTP-agnostic; this module assigns status
//! codes and strips server-side detail from 5xx bodies. The full error is
//! logged before redaction and stays correlated through its trace id.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn public_message(code: ErrorCode) -> Option<&'static str> {
    match code {
        ErrorCode::InternalError => Some("Internal server error"),
        ErrorCode::ServiceUnavailable => Some("Service temporarily unavailable"),
        _ => None,
    }
}

/// Body sent to clients: 5xx errors lose their message and details.
fn redacted(error: &Error) -> Error {
    let Some(message) = public_message(error.code()) else {
        return error.clone();
    };
    let replacement = Error::new(error.code(), message);
    match error.trace_id() {
        Some(id) => replacement.with_trace_id(id.to_owned()),
        None => replacement,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if public_message(self.code()).is_some() {
            error!(
                code = ?self.code(),
                message = self.message(),
                trace_id = self.trace_id(),
                details = ?self.details(),
                "request failed with server error"
            );
        }

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(redacted(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}
