mod common;

use axum::http::{StatusCode, header};
use common::{bearer, get_request, json_request, send, test_app};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn register_returns_created_user() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/v1/auth/register",
            None,
            json!({"username": "testuser", "password": "password123"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "testuser");
    assert!(body["id"].as_i64().is_some());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn register_rejects_existing_username() {
    let app = test_app().await;
    let req = || {
        json_request(
            "POST",
            "/v1/auth/register",
            None,
            json!({"username": "testuser", "password": "password123"}),
        )
    };
    send(&app, req()).await;
    let (status, body) = send(&app, req()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "USER_ALREADY_EXISTS");
    assert_eq!(body["error"]["message"], "User [ testuser ] already exists");
}

#[tokio::test]
async fn register_rejects_blank_fields() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/v1/auth/register",
            None,
            json!({"username": " ", "password": "password123"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        json_request("POST", "/v1/auth/register", None, json!({"username": "a"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_issues_usable_token() {
    let app = test_app().await;
    let creds = json!({"username": "testuser", "password": "password123"});
    send(&app, json_request("POST", "/v1/auth/register", None, creds.clone())).await;

    let (status, body) = send(&app, json_request("POST", "/v1/auth/login", None, creds)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "Bearer");
    let token = body["token"].as_str().expect("token missing");

    let auth = format!("Bearer {token}");
    let (status, body) = send(&app, get_request("/v1/card", Some(&auth))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalElements"], 0);
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = test_app().await;
    send(
        &app,
        json_request(
            "POST",
            "/v1/auth/register",
            None,
            json!({"username": "testuser", "password": "password123"}),
        ),
    )
    .await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/v1/auth/login",
            None,
            json!({"username": "testuser", "password": "nope"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn login_for_unknown_user_is_not_found() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/v1/auth/login",
            None,
            json!({"username": "ghost", "password": "password123"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "User not found");
}

#[tokio::test]
async fn user_routes_require_token_and_list_users() {
    let app = test_app().await;
    for name in ["alice", "bob"] {
        send(
            &app,
            json_request(
                "POST",
                "/v1/auth/register",
                None,
                json!({"username": name, "password": "password123"}),
            ),
        )
        .await;
    }

    let (status, _) = send(&app, get_request("/v1/user", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let auth = bearer("alice");
    let (status, body) = send(&app, get_request("/v1/user?page=0&size=1", Some(&auth))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"].as_array().unwrap().len(), 1);
    assert_eq!(body["content"][0]["username"], "alice");
    assert_eq!(body["totalElements"], 2);
    assert_eq!(body["totalPages"], 2);

    let (status, body) = send(&app, get_request("/v1/user/bob", Some(&auth))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "bob");

    let (status, _) = send(&app, get_request("/v1/user/carol", Some(&auth))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn docs_and_health_are_public() {
    let app = test_app().await;

    let (status, body) = send(&app, get_request("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "UP");

    let (status, body) = send(&app, get_request("/v3/api-docs", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["openapi"].as_str().unwrap().starts_with("3."));
    assert!(body["paths"]["/v1/card/upload"]["post"].is_object());

    let resp = app
        .clone()
        .oneshot(get_request("/docs", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
}
