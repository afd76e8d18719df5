//! Tests for project registry handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::inbound::http::test_utils::{TestPorts, bearer, error_body, json_body, register};

async fn create<S, B>(app: &S, token: &str, body: Value) -> Value
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse<B>,
            Error = actix_web::Error,
        >,
    B: actix_web::body::MessageBody,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/projects")
        .insert_header(bearer(token))
        .set_json(body)
        .to_request();
    let (status, body) = json_body(app, request).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body
}

#[actix_web::test]
async fn create_assigns_caller_as_owner() {
    let app = TestPorts::default().init().await;
    let (token, alice) = register(&app, "Alice", "alice@x.com").await;

    let body = create(
        &app,
        &token,
        json!({"title": "Rust CLI", "category": "web", "level": "beginner"}),
    )
    .await;

    assert_eq!(body["owner_id"], alice);
    assert_eq!(body["owner"]["name"], "Alice");
    assert_eq!(body["description"], "");
    assert!(body.get("members").is_none());
}

#[actix_web::test]
async fn create_requires_a_title() {
    let app = TestPorts::default().init().await;
    let (token, _) = register(&app, "Alice", "alice@x.com").await;

    let request = actix_test::TestRequest::post()
        .uri("/api/projects")
        .insert_header(bearer(&token))
        .set_json(json!({"title": ""}))
        .to_request();
    let (status, body) = error_body(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "title");
}

#[actix_web::test]
async fn anonymous_create_is_unauthorized() {
    let app = TestPorts::default().init().await;
    let request = actix_test::TestRequest::post()
        .uri("/api/projects")
        .set_json(json!({"title": "Rust CLI"}))
        .to_request();

    let (status, _) = error_body(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case("", "", 3)]
#[case("web", "", 2)]
#[case("web", "advanced", 1)]
#[case("ml", "", 0)]
#[actix_web::test]
async fn list_filters_by_exact_match(
    #[case] category: &str,
    #[case] level: &str,
    #[case] expected: usize,
) {
    let app = TestPorts::default().init().await;
    let (token, _) = register(&app, "Alice", "alice@x.com").await;
    for (title, category, level) in [
        ("A", "web", "beginner"),
        ("B", "web", "advanced"),
        ("C", "data", "beginner"),
    ] {
        create(
            &app,
            &token,
            json!({"title": title, "category": category, "level": level}),
        )
        .await;
    }

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/projects?category={category}&level={level}"))
        .to_request();
    let (status, body) = json_body(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(expected));
}

#[actix_web::test]
async fn get_includes_members() {
    let app = TestPorts::default().init().await;
    let (owner, _) = register(&app, "Alice", "alice@x.com").await;
    let (bob, bob_id) = register(&app, "Bob", "bob@x.com").await;
    let project = create(&app, &owner, json!({"title": "Rust CLI"})).await;
    let id = project["id"].as_i64().expect("project id");

    let apply = actix_test::TestRequest::post()
        .uri(&format!("/api/projects/{id}/apply"))
        .insert_header(bearer(&bob))
        .to_request();
    json_body(&app, apply).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/projects/{id}"))
        .to_request();
    let (status, body) = json_body(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["members"][0]["user_id"], bob_id);
    assert_eq!(body["members"][0]["status"], "pending");
    assert_eq!(body["members"][0]["user"]["name"], "Bob");
}

#[actix_web::test]
async fn update_keeps_empty_title_and_overwrites_the_rest() {
    let app = TestPorts::default().init().await;
    let (token, _) = register(&app, "Alice", "alice@x.com").await;
    let project = create(
        &app,
        &token,
        json!({"title": "Rust CLI", "description": "old", "category": "web"}),
    )
    .await;
    let id = project["id"].as_i64().expect("project id");

    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/projects/{id}"))
        .insert_header(bearer(&token))
        .set_json(json!({"title": "", "description": "X"}))
        .to_request();
    let (status, body) = json_body(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Rust CLI");
    assert_eq!(body["description"], "X");
    assert_eq!(body["category"], "");
}

#[actix_web::test]
async fn whitespace_title_is_stored_verbatim() {
    let app = TestPorts::default().init().await;
    let (token, _) = register(&app, "Alice", "alice@x.com").await;
    let project = create(&app, &token, json!({"title": "  P1  "})).await;
    assert_eq!(project["title"], "  P1  ");
    let id = project["id"].as_i64().expect("project id");

    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/projects/{id}"))
        .insert_header(bearer(&token))
        .set_json(json!({"title": "   "}))
        .to_request();
    let (status, body) = json_body(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "   ");
}

#[actix_web::test]
async fn non_owner_cannot_update_or_delete() {
    let app = TestPorts::default().init().await;
    let (owner, _) = register(&app, "Alice", "alice@x.com").await;
    let (bob, _) = register(&app, "Bob", "bob@x.com").await;
    let project = create(&app, &owner, json!({"title": "Rust CLI"})).await;
    let id = project["id"].as_i64().expect("project id");

    let update = actix_test::TestRequest::put()
        .uri(&format!("/api/projects/{id}"))
        .insert_header(bearer(&bob))
        .set_json(json!({"title": "Mine"}))
        .to_request();
    let (status, _) = error_body(&app, update).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let delete = actix_test::TestRequest::delete()
        .uri(&format!("/api/projects/{id}"))
        .insert_header(bearer(&bob))
        .to_request();
    let (status, _) = error_body(&app, delete).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn deleted_project_disappears() {
    let app = TestPorts::default().init().await;
    let (token, _) = register(&app, "Alice", "alice@x.com").await;
    let project = create(&app, &token, json!({"title": "Rust CLI"})).await;
    let id = project["id"].as_i64().expect("project id");

    let delete = actix_test::TestRequest::delete()
        .uri(&format!("/api/projects/{id}"))
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = json_body(&app, delete).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let get = actix_test::TestRequest::get()
        .uri(&format!("/api/projects/{id}"))
        .to_request();
    let (status, _) = error_body(&app, get).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let list = actix_test::TestRequest::get().uri("/api/projects").to_request();
    let (_, body) = json_body(&app, list).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn missing_project_is_not_found_before_authentication() {
    let app = TestPorts::default().init().await;
    let request = actix_test::TestRequest::delete()
        .uri("/api/projects/42")
        .to_request();

    let (status, _) = error_body(&app, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn malformed_id_is_rejected_before_lookup() {
    let app = TestPorts::default().init().await;
    let request = actix_test::TestRequest::get()
        .uri("/api/projects/-3")
        .to_request();

    let (status, body) = error_body(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["value"], "-3");
}
