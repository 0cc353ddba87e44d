//! Registration and login handlers
//!
//! Body extraction failures (missing content type, malformed JSON, wrong
//! field types) are folded into the same responses as missing fields, so
//! clients only ever see the JSON error contract.

use crate::auth::service::MSG_FIELDS_REQUIRED;
use crate::auth::{LoginRequest, SignupRequest};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

/// Register a new identity
///
/// All of `username`, `password` and `aadhaar` must be present and
/// non-empty. The password is stored only as an Argon2 hash.
#[utoipa::path(
    post,
    path = "/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User registered successfully", body = crate::auth::SignupResponse),
        (status = 400, description = "Missing fields, or user or aadhaar already exists", body = crate::error::ErrorResponse),
        (status = 500, description = "Store or server error", body = crate::error::ErrorResponse),
    )
)]
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Signup body rejected");
        AppError::Validation(MSG_FIELDS_REQUIRED.to_string())
    })?;

    let response = state.auth.register(request).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Authenticate and receive a signed token valid for 24 hours
///
/// Unknown usernames and wrong passwords get the same 401 response.
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = crate::auth::LoginResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse),
        (status = 500, description = "Query failure", body = crate::error::ErrorResponse),
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Login body rejected");
        AppError::Auth
    })?;

    let response = state.auth.login(request).await?;

    Ok(Json(response))
}
