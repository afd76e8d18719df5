//! Project conversation handlers.
//!
//! ```text
//! GET  /api/projects/{id}/messages
//! POST /api/projects/{id}/messages {"content":"hello"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Caller, Error, MessageContent, ProjectId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field, parse_id};

const PROJECT_ID: FieldName = FieldName::new("id");
const CONTENT: FieldName = FieldName::new("content");

/// Message body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct PostMessageRequest {
    #[schema(example = "hello")]
    pub content: String,
}

/// Conversation history in chronological order.
#[utoipa::path(
    get,
    path = "/api/projects/{id}/messages",
    params(("id" = i64, Path, description = "Project id")),
    responses(
        (status = 200, description = "Messages", body = [MessageResponse]),
        (status = 400, description = "Invalid id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not a collaborator", body = Error),
        (status = 404, description = "Project not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["messages"],
    operation_id = "listMessages",
    security(("bearer" = []))
)]
#[get("/projects/{id}/messages")]
pub async fn list_messages(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<MessageResponse>>> {
    let project_id: ProjectId = parse_id(&path, PROJECT_ID)?;
    let messages = state.conversations.list(project_id, caller).await?;
    Ok(web::Json(
        messages.into_iter().map(MessageResponse::from).collect(),
    ))
}

/// Post a message to the project conversation.
#[utoipa::path(
    post,
    path = "/api/projects/{id}/messages",
    params(("id" = i64, Path, description = "Project id")),
    request_body = PostMessageRequest,
    responses(
        (status = 201, description = "Message posted", body = MessageResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not a collaborator", body = Error),
        (status = 404, description = "Project not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["messages"],
    operation_id = "postMessage",
    security(("bearer" = []))
)]
#[post("/projects/{id}/messages")]
pub async fn post_message(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
    payload: web::Json<PostMessageRequest>,
) -> ApiResult<HttpResponse> {
    let project_id: ProjectId = parse_id(&path, PROJECT_ID)?;
    let content = MessageContent::new(payload.into_inner().content)
        .map_err(|err| invalid_field(CONTENT, err))?;

    let view = state.conversations.post(project_id, caller, content).await?;
    Ok(HttpResponse::Created().json(MessageResponse::from(view)))
}
