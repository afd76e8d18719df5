//! Project registry HTTP handlers.
//!
//! ```text
//! GET    /api/projects?category=web&level=beginner
//! POST   /api/projects
//! GET    /api/projects/{id}
//! PUT    /api/projects/{id}
//! DELETE /api/projects/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Caller, Error, ProjectDraft, ProjectFilter, ProjectId, ProjectUpdate,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ProjectResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field, parse_id};

const PROJECT_ID: FieldName = FieldName::new("id");
const TITLE: FieldName = FieldName::new("title");

/// Project body for create and update.
///
/// On update an empty title keeps the current one while the remaining fields
/// are always overwritten.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct ProjectRequest {
    #[schema(example = "Rust CLI")]
    pub title: String,
    pub description: String,
    #[schema(example = "web")]
    pub category: String,
    #[schema(example = "beginner")]
    pub level: String,
}

/// Exact-match listing filters. Empty values are ignored.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProjectListQuery {
    pub category: Option<String>,
    pub level: Option<String>,
}

/// List projects ordered by id.
#[utoipa::path(
    get,
    path = "/api/projects",
    params(ProjectListQuery),
    responses(
        (status = 200, description = "Projects", body = [ProjectResponse]),
        (status = 400, description = "Invalid query", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["projects"],
    operation_id = "listProjects",
    security([])
)]
#[get("/projects")]
pub async fn list_projects(
    state: web::Data<HttpState>,
    query: web::Query<ProjectListQuery>,
) -> ApiResult<web::Json<Vec<ProjectResponse>>> {
    let ProjectListQuery { category, level } = query.into_inner();
    let projects = state
        .projects
        .list(ProjectFilter::new(category, level))
        .await?;
    Ok(web::Json(
        projects.into_iter().map(ProjectResponse::from).collect(),
    ))
}

/// Create a project owned by the caller.
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = ProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "createProject",
    security(("bearer" = []))
)]
#[post("/projects")]
pub async fn create_project(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<ProjectRequest>,
) -> ApiResult<HttpResponse> {
    let ProjectRequest {
        title,
        description,
        category,
        level,
    } = payload.into_inner();
    let draft = ProjectDraft::try_from_parts(&title, description, category, level)
        .map_err(|err| invalid_field(TITLE, err))?;

    let view = state.projects.create(caller, draft).await?;
    Ok(HttpResponse::Created().json(ProjectResponse::from(view)))
}

/// Project with owner profile and every membership record.
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(("id" = i64, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project details", body = ProjectResponse),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Project not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "getProject",
    security([])
)]
#[get("/projects/{id}")]
pub async fn get_project(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProjectResponse>> {
    let id: ProjectId = parse_id(&path, PROJECT_ID)?;
    let details = state.projects.get(id).await?;
    Ok(web::Json(details.into()))
}

/// Owner-only project update.
#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    params(("id" = i64, Path, description = "Project id")),
    request_body = ProjectRequest,
    responses(
        (status = 200, description = "Updated project", body = ProjectResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "Project not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "updateProject",
    security(("bearer" = []))
)]
#[put("/projects/{id}")]
pub async fn update_project(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
    payload: web::Json<ProjectRequest>,
) -> ApiResult<web::Json<ProjectResponse>> {
    let id: ProjectId = parse_id(&path, PROJECT_ID)?;
    let ProjectRequest {
        title,
        description,
        category,
        level,
    } = payload.into_inner();
    let update = ProjectUpdate::from_parts(&title, description, category, level);

    let view = state.projects.update(id, caller, update).await?;
    Ok(web::Json(view.into()))
}

/// Owner-only logical removal.
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(("id" = i64, Path, description = "Project id")),
    responses(
        (status = 204, description = "Project removed"),
        (status = 400, description = "Invalid id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "Project not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "deleteProject",
    security(("bearer" = []))
)]
#[delete("/projects/{id}")]
pub async fn delete_project(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: ProjectId = parse_id(&path, PROJECT_ID)?;
    state.projects.delete(id, caller).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "projects_tests.rs"]
mod tests;
