//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler under `/api` plus the health probes,
//! the response DTOs, and the bearer token security scheme. Swagger UI
//! serves the generated document in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::auth::{LoginRequest, RegisterRequest};
use crate::inbound::http::messages::PostMessageRequest;
use crate::inbound::http::projects::ProjectRequest;
use crate::inbound::http::schemas::{
    AuthResponse, MemberResponse, MessageResponse, ProjectResponse, UserResponse,
};
use crate::inbound::http::users::UpdateUserRequest;

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Token issued by POST /api/auth/register or POST /api/auth/login.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Project exchange API",
        description = "Accounts, projects, join requests, and project conversations."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::projects::list_projects,
        crate::inbound::http::projects::create_project,
        crate::inbound::http::projects::get_project,
        crate::inbound::http::projects::update_project,
        crate::inbound::http::projects::delete_project,
        crate::inbound::http::members::apply,
        crate::inbound::http::members::accept,
        crate::inbound::http::members::reject,
        crate::inbound::http::messages::list_messages,
        crate::inbound::http::messages::post_message,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        RegisterRequest,
        LoginRequest,
        UpdateUserRequest,
        ProjectRequest,
        PostMessageRequest,
        AuthResponse,
        UserResponse,
        ProjectResponse,
        MemberResponse,
        MessageResponse,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "Public profiles"),
        (name = "projects", description = "Project registry"),
        (name = "members", description = "Join requests and decisions"),
        (name = "messages", description = "Project conversations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
