//! Tests for user profile handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::json;

use crate::inbound::http::test_utils::{TestPorts, bearer, error_body, json_body, register};

#[actix_web::test]
async fn profile_is_public_and_hides_the_password_hash() {
    let app = TestPorts::default().init().await;
    let (_, id) = register(&app, "Alice", "alice@x.com").await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/users/{id}"))
        .to_request();
    let (status, body) = json_body(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["skills"], "");
    assert!(body.get("password_hash").is_none());
}

#[rstest]
#[case("0")]
#[case("abc")]
#[actix_web::test]
async fn malformed_id_is_invalid(#[case] raw: &str) {
    let app = TestPorts::default().init().await;
    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/users/{raw}"))
        .to_request();

    let (status, body) = error_body(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], "invalid_id");
}

#[actix_web::test]
async fn unknown_user_is_not_found() {
    let app = TestPorts::default().init().await;
    let request = actix_test::TestRequest::get().uri("/api/users/99").to_request();

    let (status, body) = error_body(&app, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[actix_web::test]
async fn owner_updates_profile_and_empty_name_is_kept() {
    let app = TestPorts::default().init().await;
    let (token, id) = register(&app, "Alice", "alice@x.com").await;

    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/users/{id}"))
        .insert_header(bearer(&token))
        .set_json(json!({"name": "", "skills": "rust", "bio": "hello"}))
        .to_request();
    let (status, body) = json_body(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["skills"], "rust");
    assert_eq!(body["bio"], "hello");
}

#[actix_web::test]
async fn updating_someone_else_is_forbidden() {
    let app = TestPorts::default().init().await;
    let (_, alice) = register(&app, "Alice", "alice@x.com").await;
    let (bob_token, _) = register(&app, "Bob", "bob@x.com").await;

    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/users/{alice}"))
        .insert_header(bearer(&bob_token))
        .set_json(json!({"name": "Mallory"}))
        .to_request();
    let (status, body) = error_body(&app, request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");
}

#[rstest]
#[case(None)]
#[case(Some("Bearer not-a-token"))]
#[actix_web::test]
async fn anonymous_update_is_unauthorized(#[case] header: Option<&str>) {
    let app = TestPorts::default().init().await;
    let (_, alice) = register(&app, "Alice", "alice@x.com").await;

    let mut request = actix_test::TestRequest::put()
        .uri(&format!("/api/users/{alice}"))
        .set_json(json!({"bio": "x"}));
    if let Some(value) = header {
        request = request.insert_header(("authorization", value));
    }
    let (status, body) = error_body(&app, request.to_request()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
}
