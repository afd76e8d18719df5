//! Test helpers for inbound HTTP components.
//!
//! Handler tests run the full API against the in-memory store with real
//! credential adapters. Argon2 runs with minimal cost parameters.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use actix_web::{App, web};
use mockable::DefaultClock;
use serde_json::{Value, json};

use super::configure_api;
use super::state::{HttpState, Repositories};
use crate::Trace;
use crate::outbound::credentials::{Argon2PasswordHasher, JwtTokenService};
use crate::outbound::memory::InMemoryStore;

const TEST_SECRET: &[u8] = b"handler-test-secret";

/// In-memory ports shared by a test application.
#[derive(Clone, Default)]
pub(crate) struct TestPorts {
    pub store: InMemoryStore,
}

impl TestPorts {
    pub fn state(&self) -> HttpState {
        let store = Arc::new(self.store.clone());
        let clock = Arc::new(DefaultClock);
        HttpState::assemble(
            Repositories {
                users: Arc::clone(&store),
                projects: Arc::clone(&store),
                memberships: Arc::clone(&store),
                messages: store,
            },
            Arc::new(Argon2PasswordHasher::with_params(1024, 1, 1).expect("argon2 params")),
            Arc::new(JwtTokenService::new(TEST_SECRET, clock.clone())),
            clock,
        )
    }

    /// Build a test service exposing the API under `/api`.
    pub async fn init(
        self,
    ) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
    {
        actix_test::init_service(
            App::new()
                .wrap(Trace)
                .app_data(web::Data::new(self.state()))
                .configure(configure_api),
        )
        .await
    }
}

/// Send a request and decode the JSON body; empty bodies decode as `null`.
pub(crate) async fn json_body<S, B>(app: &S, request: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    let bytes = actix_test::read_body(response).await;
    if bytes.is_empty() {
        return (status, Value::Null);
    }
    let body = serde_json::from_slice(&bytes).expect("JSON response body");
    (status, body)
}

/// Like [`json_body`] but asserts the error envelope shape.
pub(crate) async fn error_body<S, B>(app: &S, request: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = json_body(app, request).await;
    assert!(
        body["code"].is_string() && body["message"].is_string(),
        "expected error envelope, got {body}"
    );
    (status, body)
}

/// Register an account and return its token and id.
pub(crate) async fn register<S, B>(app: &S, name: &str, email: &str) -> (String, i64)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({"name": name, "email": email, "password": "secret1"}))
        .to_request();
    let (status, body) = json_body(app, request).await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
    let token = body["token"].as_str().expect("token").to_owned();
    let id = body["user"]["id"].as_i64().expect("user id");
    (token, id)
}

/// `Authorization` header pair for a bearer token.
pub(crate) fn bearer(token: &str) -> (&'static str, String) {
    ("authorization", format!("Bearer {token}"))
}
