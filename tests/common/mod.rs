#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use cardvault::auth::JwtKeys;
use cardvault::config::Config;
use serde_json::Value;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test-jwt-secret";
pub const BOUNDARY: &str = "cardvault-test-boundary";
pub const HEADER_LINE: &str = "DESAFIO-HYPERATIVA           20180524LOTE0001000010";

pub fn test_config(max_upload: u64) -> Config {
    let mut cfg = Config::default();
    cfg.security.jwt_secret = JWT_SECRET.to_string();
    cfg.security.bcrypt_cost = 4;
    cfg.encryption.key = "test-encryption-key".to_string();
    cfg.upload.max_size = max_upload;
    cfg
}

/// Router over a fresh single-connection in-memory database.
pub async fn test_app_with(cfg: Config) -> Router {
    let pool = cardvault::db::connect("sqlite::memory:", 1)
        .await
        .expect("failed to open in-memory database");
    cardvault::db::migrate(&pool)
        .await
        .expect("failed to run migrations");
    let state = cardvault::VaultState::build(pool, &cfg)
        .await
        .expect("failed to build state");
    cardvault::vault_router(state)
}

pub async fn test_app() -> Router {
    test_app_with(test_config(10 * 1024 * 1024)).await
}

pub fn token_for(username: &str) -> String {
    JwtKeys::new(JWT_SECRET, 3600)
        .expect("valid token lifetime")
        .issue(username)
        .expect("failed to issue token")
}

pub fn bearer(username: &str) -> String {
    format!("Bearer {}", token_for(username))
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.expect("request failed");
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

pub fn json_request(method: &str, uri: &str, auth: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub fn get_request(uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).expect("failed to build request")
}

pub fn upload_request(auth: Option<&str>, file_name: &str, content: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
         Content-Type: text/plain\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    );
    let mut builder = Request::builder()
        .method("POST")
        .uri("/v1/card/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder
        .body(Body::from(body))
        .expect("failed to build request")
}
