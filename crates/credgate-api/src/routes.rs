//! API route definitions

use crate::handlers::{auth, health};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

/// OpenAPI document for the public endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::signup_handler,
        auth::login_handler,
        health::health_check,
        health::readiness_check,
    ),
    components(schemas(
        crate::auth::SignupRequest,
        crate::auth::SignupResponse,
        crate::auth::LoginRequest,
        crate::auth::LoginResponse,
        crate::error::ErrorResponse,
        health::HealthResponse,
        health::ReadinessResponse,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "health", description = "Liveness and readiness probes"),
    )
)]
pub struct ApiDoc;

/// Registration and login routes
pub fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signup", post(auth::signup_handler))
        .route("/login", post(auth::login_handler))
}

/// Probes and documentation
pub fn service_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
}
