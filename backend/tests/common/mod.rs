//! Shared helpers for end-to-end HTTP tests against the in-process store.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{Method, StatusCode};
use actix_web::test as actix_test;
use actix_web::{App, web};
use mockable::DefaultClock;
use serde_json::{Value, json};

use backend::Trace;
use backend::middleware::cors;
use backend::inbound::http::configure_api;
use backend::inbound::http::state::{HttpState, Repositories};
use backend::outbound::credentials::{Argon2PasswordHasher, JwtTokenService};
use backend::outbound::memory::InMemoryStore;

/// Build the API over a fresh in-process store signing with `secret`.
pub fn state_with_secret(store: &InMemoryStore, secret: &[u8]) -> HttpState {
    let store = Arc::new(store.clone());
    let clock = Arc::new(DefaultClock);
    HttpState::assemble(
        Repositories {
            users: Arc::clone(&store),
            projects: Arc::clone(&store),
            memberships: Arc::clone(&store),
            messages: store,
        },
        Arc::new(Argon2PasswordHasher::with_params(1024, 1, 1).expect("argon2 params")),
        Arc::new(JwtTokenService::new(secret, clock.clone())),
        clock,
    )
}

/// Build the app admitting any browser origin.
pub async fn init_app(
    state: HttpState,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    init_app_for_origins(state, &[]).await
}

/// Build the app admitting only `origins` cross-origin.
pub async fn init_app_for_origins(
    state: HttpState,
    origins: &[&str],
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    let origins: Vec<String> = origins.iter().map(|o| (*o).to_owned()).collect();
    actix_test::init_service(
        App::new()
            .wrap(cors(&origins))
            .wrap(Trace)
            .app_data(web::Data::new(state))
            .configure(configure_api),
    )
    .await
}

/// Send a JSON request, optionally authenticated, and decode the response.
pub async fn send<S, B>(
    app: &S,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let mut request = actix_test::TestRequest::default().method(method).uri(uri);
    if let Some(token) = token {
        request = request.insert_header(("authorization", format!("Bearer {token}")));
    }
    if let Some(body) = body {
        request = request.set_json(body);
    }
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let bytes = actix_test::read_body(response).await;
    if bytes.is_empty() {
        return (status, Value::Null);
    }
    (status, serde_json::from_slice(&bytes).expect("JSON body"))
}

/// Register an account and return its token and id.
pub async fn register<S, B>(app: &S, name: &str, email: &str) -> (String, i64)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({"name": name, "email": email, "password": "secret1"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
    (
        body["token"].as_str().expect("token").to_owned(),
        body["user"]["id"].as_i64().expect("user id"),
    )
}
