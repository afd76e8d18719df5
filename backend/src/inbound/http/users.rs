//! User profile handlers.
//!
//! ```text
//! GET /api/users/1
//! PUT /api/users/1 {"name":"Alice","skills":"rust","bio":"hi"}
//! ```

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ApiResult;
use super::schemas::UserResponse;
use super::state::HttpState;
use super::validation::{FieldName, parse_id};
use crate::domain::{Caller, Error, ProfileUpdate, UserId};

const USER_ID: FieldName = FieldName::new("id");

/// Profile update body. An empty name keeps the current one.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct UpdateUserRequest {
    pub name: String,
    pub skills: String,
    pub bio: String,
}

impl From<UpdateUserRequest> for ProfileUpdate {
    fn from(value: UpdateUserRequest) -> Self {
        Self::from_parts(&value.name, value.skills, value.bio)
    }
}

/// Public profile of a user.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security([])
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id: UserId = parse_id(&path, USER_ID)?;
    let profile = state.directory.get_profile(user_id).await?;
    Ok(web::Json(profile.into()))
}

/// Update the caller's own profile.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not your profile", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser",
    security(("bearer" = []))
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id: UserId = parse_id(&path, USER_ID)?;
    let profile = state
        .directory
        .update_profile(user_id, caller, payload.into_inner().into())
        .await?;
    Ok(web::Json(profile.into()))
}

#[cfg(test)]
mod tests;
