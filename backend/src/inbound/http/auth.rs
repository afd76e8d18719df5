//! Registration and login handlers.
//!
//! ```text
//! POST /api/auth/register {"name":"Alice","email":"alice@x.com","password":"secret1"}
//! POST /api/auth/login {"email":"alice@x.com","password":"secret1"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ApiResult;
use super::schemas::AuthResponse;
use super::state::HttpState;
use super::validation::auth_validation_error;
use crate::domain::{Error, LoginCredentials, Registration};

/// Registration request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    #[schema(example = "Alice")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "alice@x.com")]
    pub email: String,
    /// At least six characters.
    #[serde(default)]
    #[schema(example = "secret1")]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "alice@x.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "secret1")]
    pub password: String,
}

/// Create an account and return a bearer token for it.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        name,
        email,
        password,
    } = payload.into_inner();
    let registration = Registration::try_from_parts(&name, &email, &password)
        .map_err(|err| auth_validation_error(&err))?;

    let session = state.accounts.register(registration).await?;
    Ok(HttpResponse::Created().json(AuthResponse::from(session)))
}

/// Exchange email and password for a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AuthResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AuthResponse>> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&email, &password)
        .map_err(|err| auth_validation_error(&err))?;

    let session = state.accounts.login(credentials).await?;
    Ok(web::Json(session.into()))
}
