//! API Integration Tests
//!
//! Drives the full router against the in-memory credential store.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use credgate_api::{
    auth::{validate_token, JwtConfig, PasswordConfig},
    create_router,
    state::AppState,
};
use credgate_core::{CredentialStore, InMemoryCredentialStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const SECRET: &str = "integration-test-secret";

fn light_password_config() -> PasswordConfig {
    PasswordConfig {
        memory_cost: 4096,
        time_cost: 1,
        parallelism: 1,
        output_len: Some(32),
    }
}

fn test_app() -> (Router, Arc<InMemoryCredentialStore>) {
    test_app_with(light_password_config())
}

fn test_app_with(password_config: PasswordConfig) -> (Router, Arc<InMemoryCredentialStore>) {
    let store = Arc::new(InMemoryCredentialStore::new());
    let state = Arc::new(AppState::new(
        store.clone(),
        JwtConfig::new(SECRET),
        password_config,
    ));

    (create_router(state), store)
}

/// Helper to create a JSON request
fn create_json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };

    (status, json)
}

/// Request with a raw body and optional content type
fn create_raw_request(uri: &str, content_type: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("Content-Type", content_type);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn signup(app: &Router, body: Value) -> (StatusCode, Value) {
    send(app, create_json_request("POST", "/signup", body)).await
}

async fn login(app: &Router, body: Value) -> (StatusCode, Value) {
    send(app, create_json_request("POST", "/login", body)).await
}

// =============================================================================
// Signup
// =============================================================================

#[tokio::test]
async fn test_signup_success() {
    let (app, store) = test_app();

    let (status, json) = signup(
        &app,
        json!({"username": "alice", "password": "p@ss1234", "aadhaar": "123456789012"}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "User registered successfully");
    assert!(json.get("password").is_none());
    assert!(json.get("aadhaar").is_none());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_signup_missing_any_field() {
    let (app, store) = test_app();

    let bodies = [
        json!({"password": "p@ss1234", "aadhaar": "123456789012"}),
        json!({"username": "alice", "aadhaar": "123456789012"}),
        json!({"username": "alice", "password": "p@ss1234"}),
        json!({"username": "", "password": "p@ss1234", "aadhaar": "123456789012"}),
        json!({"username": "alice", "password": null, "aadhaar": "123456789012"}),
        json!({}),
    ];

    for body in bodies {
        let (status, json) = signup(&app, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "All fields are required");
    }

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_signup_duplicate_username() {
    let (app, _) = test_app();
    signup(
        &app,
        json!({"username": "alice", "password": "p@ss1234", "aadhaar": "123456789012"}),
    )
    .await;

    let (status, json) = signup(
        &app,
        json!({"username": "alice", "password": "another", "aadhaar": "999999999999"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "User or Aadhaar already exists");
}

#[tokio::test]
async fn test_signup_duplicate_aadhaar() {
    let (app, _) = test_app();
    signup(
        &app,
        json!({"username": "alice", "password": "p@ss1234", "aadhaar": "123456789012"}),
    )
    .await;

    let (status, json) = signup(
        &app,
        json!({"username": "bob", "password": "another", "aadhaar": "123456789012"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "User or Aadhaar already exists");
}

#[tokio::test]
async fn test_signup_stores_hash_not_plaintext() {
    let (app, store) = test_app();
    signup(
        &app,
        json!({"username": "alice", "password": "p@ss1234", "aadhaar": "123456789012"}),
    )
    .await;

    let stored = store.find_by_username("alice").await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "p@ss1234");
    assert!(credgate_api::auth::verify_password("p@ss1234", &stored.password_hash).unwrap());
    assert!(!credgate_api::auth::verify_password("p@ss12345", &stored.password_hash).unwrap());
}

#[tokio::test]
async fn test_signup_numeric_aadhaar_accepted() {
    let (app, store) = test_app();

    let (status, json) = signup(
        &app,
        json!({"username": "alice", "password": "p@ss1234", "aadhaar": 123456789012u64}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["success"], true);

    let stored = store.find_by_username("alice").await.unwrap().unwrap();
    assert_eq!(stored.aadhaar, "123456789012");
}

#[tokio::test]
async fn test_signup_without_content_type_is_missing_fields() {
    let (app, store) = test_app();
    let body = r#"{"username":"alice","password":"p@ss1234","aadhaar":"123456789012"}"#;

    let (status, json) = send(&app, create_raw_request("/signup", None, body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "All fields are required");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_signup_malformed_json_is_missing_fields() {
    let (app, _) = test_app();

    let (status, json) = send(
        &app,
        create_raw_request("/signup", Some("application/json"), r#"{"username": "alice""#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "All fields are required");
}

#[tokio::test]
async fn test_signup_wrong_field_type_is_missing_fields() {
    let (app, _) = test_app();

    let (status, json) = signup(
        &app,
        json!({"username": ["alice"], "password": "p@ss1234", "aadhaar": "123456789012"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "All fields are required");
}

#[tokio::test]
async fn test_signup_hashing_failure_is_server_error() {
    let (app, store) = test_app_with(PasswordConfig {
        memory_cost: 1,
        ..light_password_config()
    });

    let (status, json) = signup(
        &app,
        json!({"username": "alice", "password": "p@ss1234", "aadhaar": "123456789012"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Server error during signup");
    assert!(store.is_empty().await);
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_register_then_login_flow() {
    let (app, _) = test_app();

    let (status, _) = signup(
        &app,
        json!({"username": "alice", "password": "p@ss1234", "aadhaar": "123456789012"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = login(&app, json!({"username": "alice", "password": "p@ss1234"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Login successful");

    let token = json["token"].as_str().unwrap();
    assert!(!token.is_empty());

    let claims = validate_token(&JwtConfig::new(SECRET), token).unwrap();
    assert_eq!(claims.id, 1);
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);

    let (status, json) = login(&app, json!({"username": "alice", "password": "wrong"})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_unknown_user_matches_wrong_password() {
    let (app, _) = test_app();
    signup(
        &app,
        json!({"username": "alice", "password": "p@ss1234", "aadhaar": "123456789012"}),
    )
    .await;

    let unknown = login(&app, json!({"username": "nobody", "password": "p@ss1234"})).await;
    let wrong = login(&app, json!({"username": "alice", "password": "wrong"})).await;

    assert_eq!(unknown.0, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown, wrong);
}

#[tokio::test]
async fn test_login_missing_fields() {
    let (app, _) = test_app();

    let (status, json) = login(&app, json!({"username": "alice"})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_unreadable_body_is_invalid_credentials() {
    let (app, _) = test_app();
    let body = r#"{"username":"alice","password":"p@ss1234"}"#;

    let requests = [
        create_raw_request("/login", None, body),
        create_raw_request("/login", Some("application/json"), "not json"),
    ];

    for request in requests {
        let (status, json) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "Invalid credentials");
    }
}

#[tokio::test]
async fn test_login_token_not_valid_under_other_secret() {
    let (app, _) = test_app();
    signup(
        &app,
        json!({"username": "alice", "password": "p@ss1234", "aadhaar": "123456789012"}),
    )
    .await;

    let (_, json) = login(&app, json!({"username": "alice", "password": "p@ss1234"})).await;
    let token = json["token"].as_str().unwrap();

    assert!(validate_token(&JwtConfig::new("some-other-secret"), token).is_err());
}

// =============================================================================
// Service Routes
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let (app, _) = test_app();

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_readiness_check() {
    let (app, _) = test_app();

    let request = Request::builder()
        .uri("/ready")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ready"], true);
    assert_eq!(json["store"], "memory");
}

#[tokio::test]
async fn test_openapi_document_lists_endpoints() {
    let (app, _) = test_app();

    let request = Request::builder()
        .uri("/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["paths"]["/signup"].is_object());
    assert!(json["paths"]["/login"].is_object());
}
