//! Membership lifecycle handlers.
//!
//! ```text
//! POST /api/projects/{id}/apply
//! POST /api/projects/{id}/accept/{user_id}
//! POST /api/projects/{id}/reject/{user_id}
//! ```

use actix_web::{HttpResponse, post, web};

use crate::domain::{Caller, Error, ProjectId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::MemberResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

const PROJECT_ID: FieldName = FieldName::new("id");
const APPLICANT_ID: FieldName = FieldName::new("user_id");

fn parse_pair(raw: &(String, String)) -> Result<(ProjectId, UserId), Error> {
    let (project, applicant) = raw;
    Ok((
        parse_id(project, PROJECT_ID)?,
        parse_id(applicant, APPLICANT_ID)?,
    ))
}

/// Apply to join a project.
#[utoipa::path(
    post,
    path = "/api/projects/{id}/apply",
    params(("id" = i64, Path, description = "Project id")),
    responses(
        (status = 201, description = "Application recorded", body = MemberResponse),
        (status = 400, description = "Invalid id or owner applying", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Project not found", body = Error),
        (status = 409, description = "Already applied", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["members"],
    operation_id = "applyToProject",
    security(("bearer" = []))
)]
#[post("/projects/{id}/apply")]
pub async fn apply(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let project_id: ProjectId = parse_id(&path, PROJECT_ID)?;
    let view = state.memberships.apply(project_id, caller).await?;
    Ok(HttpResponse::Created().json(MemberResponse::from(view)))
}

/// Owner accepts an application.
#[utoipa::path(
    post,
    path = "/api/projects/{id}/accept/{user_id}",
    params(
        ("id" = i64, Path, description = "Project id"),
        ("user_id" = i64, Path, description = "Applicant id")
    ),
    responses(
        (status = 200, description = "Application accepted", body = MemberResponse),
        (status = 400, description = "Invalid id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "Project or application not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["members"],
    operation_id = "acceptApplication",
    security(("bearer" = []))
)]
#[post("/projects/{id}/accept/{user_id}")]
pub async fn accept(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<MemberResponse>> {
    let (project_id, applicant) = parse_pair(&path)?;
    let view = state
        .memberships
        .accept(project_id, applicant, caller)
        .await?;
    Ok(web::Json(view.into()))
}

/// Owner rejects an application. The applicant cannot apply again.
#[utoipa::path(
    post,
    path = "/api/projects/{id}/reject/{user_id}",
    params(
        ("id" = i64, Path, description = "Project id"),
        ("user_id" = i64, Path, description = "Applicant id")
    ),
    responses(
        (status = 200, description = "Application rejected", body = MemberResponse),
        (status = 400, description = "Invalid id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "Project or application not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["members"],
    operation_id = "rejectApplication",
    security(("bearer" = []))
)]
#[post("/projects/{id}/reject/{user_id}")]
pub async fn reject(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<MemberResponse>> {
    let (project_id, applicant) = parse_pair(&path)?;
    let view = state
        .memberships
        .reject(project_id, applicant, caller)
        .await?;
    Ok(web::Json(view.into()))
}
