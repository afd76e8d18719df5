//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every malformed input becomes an `invalid_request` error whose details
//! name the offending field and a stable machine-readable code.

use std::fmt;
use std::str::FromStr;

use actix_web::HttpRequest;
use actix_web::error::{JsonPayloadError, QueryPayloadError};
use serde_json::json;

use crate::domain::{AuthValidationError, Error, IdValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidId,
    InvalidValue,
    InvalidBody,
    InvalidQuery,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidValue => "invalid_value",
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::InvalidQuery => "invalid_query",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

fn field_error(field: &str, message: impl Into<String>, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

pub(crate) fn invalid_id_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a positive integer")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidId.as_str(),
    }))
}

/// Parse a path segment into a record identifier.
pub(crate) fn parse_id<T>(value: &str, field: FieldName) -> Result<T, Error>
where
    T: FromStr<Err = IdValidationError>,
{
    value.parse().map_err(|_| invalid_id_error(field, value))
}

/// Report a domain validation failure against a request field.
pub(crate) fn invalid_field(field: FieldName, reason: impl fmt::Display) -> Error {
    field_error(field.as_str(), reason.to_string(), ErrorCode::InvalidValue)
}

/// Report a registration or login validation failure.
pub(crate) fn auth_validation_error(error: &AuthValidationError) -> Error {
    field_error(error.field(), error.to_string(), ErrorCode::InvalidValue)
}

/// Error handler for `web::JsonConfig`.
pub(crate) fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    field_error(
        "body",
        format!("invalid JSON body: {err}"),
        ErrorCode::InvalidBody,
    )
    .into()
}

/// Error handler for `web::QueryConfig`.
pub(crate) fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    field_error(
        "query",
        format!("invalid query string: {err}"),
        ErrorCode::InvalidQuery,
    )
    .into()
}
