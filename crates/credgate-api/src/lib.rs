//! credgate API - registration and login over HTTP
//!
//! `POST /signup` stores a new identity with an Argon2 password hash;
//! `POST /login` verifies credentials and returns a signed token.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

use axum::Router;
use state::AppState;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the application router over prepared state
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::auth_routes())
        .merge(routes::service_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
