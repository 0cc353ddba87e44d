//! Authentication service layer
//!
//! Registration hashes the password and then inserts the identity; login
//! looks the identity up and then verifies the password. Each step is
//! awaited before the next one starts.

use super::jwt::{issue_token, JwtConfig};
use super::password::{hash_password_blocking, verify_password_blocking, PasswordConfig};
use crate::error::AppError;
use credgate_core::{CredentialStore, NewIdentity, StoreError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

pub const MSG_FIELDS_REQUIRED: &str = "All fields are required";
pub const MSG_ALREADY_EXISTS: &str = "User or Aadhaar already exists";
pub const MSG_SIGNUP_DB_ERROR: &str = "Database error during signup";
pub const MSG_SIGNUP_SERVER_ERROR: &str = "Server error during signup";
pub const MSG_LOGIN_DB_ERROR: &str = "Database query failed";
pub const MSG_LOGIN_SERVER_ERROR: &str = "Server error during login";
pub const MSG_REGISTERED: &str = "User registered successfully";
pub const MSG_LOGGED_IN: &str = "Login successful";

/// Registration request
///
/// Fields are optional at the wire level so that an absent field is reported
/// as a validation failure rather than a JSON rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SignupRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Accepted as a JSON string or number
    #[serde(default, deserialize_with = "string_or_number")]
    #[schema(value_type = Option<String>)]
    pub aadhaar: Option<String>,
}

/// Deserialize an optional field that may arrive as a string or a number
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}

/// Login request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Registration response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignupResponse {
    pub success: bool,
    pub message: String,
}

/// Login response carrying the signed token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
}

/// Returns the value if present and non-empty
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.is_empty())
}

/// Authentication service
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    jwt_config: JwtConfig,
    password_config: PasswordConfig,
}

impl AuthService {
    /// Create a new authentication service over an injected store
    pub fn new(
        store: Arc<dyn CredentialStore>,
        jwt_config: JwtConfig,
        password_config: PasswordConfig,
    ) -> Self {
        Self {
            store,
            jwt_config,
            password_config,
        }
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    /// Register a new identity
    ///
    /// * `Err(AppError::Validation)` - a field is absent or empty
    /// * `Err(AppError::Conflict)` - username or aadhaar already taken
    /// * `Err(AppError::Store)` - any other persistence failure
    /// * `Err(AppError::Server)` - hashing failed
    pub async fn register(&self, request: SignupRequest) -> Result<SignupResponse, AppError> {
        let (Some(username), Some(password), Some(aadhaar)) = (
            present(&request.username),
            present(&request.password),
            present(&request.aadhaar),
        ) else {
            return Err(AppError::Validation(MSG_FIELDS_REQUIRED.to_string()));
        };

        let password_hash =
            hash_password_blocking(password.to_string(), self.password_config.clone())
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "Password hashing failed");
                    AppError::Server(MSG_SIGNUP_SERVER_ERROR.to_string())
                })?;

        let identity = self
            .store
            .insert_identity(NewIdentity::new(username, password_hash, aadhaar))
            .await
            .map_err(|e| match e {
                StoreError::Duplicate(detail) => {
                    tracing::info!(username, %detail, "Signup rejected: duplicate entry");
                    AppError::Conflict(MSG_ALREADY_EXISTS.to_string())
                }
                StoreError::Database(detail) => {
                    tracing::error!(username, %detail, "Signup insert failed");
                    AppError::Store(MSG_SIGNUP_DB_ERROR.to_string())
                }
            })?;

        tracing::info!(user_id = identity.id, username, "User registered");

        Ok(SignupResponse {
            success: true,
            message: MSG_REGISTERED.to_string(),
        })
    }

    /// Authenticate and issue a token
    ///
    /// Unknown usernames and wrong passwords both yield `AppError::Auth`.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        let (Some(username), Some(password)) =
            (present(&request.username), present(&request.password))
        else {
            return Err(AppError::Auth);
        };

        let identity = self
            .store
            .find_by_username(username)
            .await
            .map_err(|e| {
                tracing::error!(username, error = %e, "Login lookup failed");
                AppError::Store(MSG_LOGIN_DB_ERROR.to_string())
            })?;

        let Some(identity) = identity else {
            tracing::debug!(username, "Login rejected");
            return Err(AppError::Auth);
        };

        let matches = verify_password_blocking(password.to_string(), identity.password_hash)
            .await
            .map_err(|e| {
                tracing::error!(user_id = identity.id, error = %e, "Password verification failed");
                AppError::Server(MSG_LOGIN_SERVER_ERROR.to_string())
            })?;

        if !matches {
            tracing::debug!(username, "Login rejected");
            return Err(AppError::Auth);
        }

        let token = issue_token(&self.jwt_config, identity.id, &identity.username).map_err(|e| {
            tracing::error!(user_id = identity.id, error = %e, "Token issuance failed");
            AppError::Server(MSG_LOGIN_SERVER_ERROR.to_string())
        })?;

        tracing::info!(user_id = identity.id, username, "Login successful");

        Ok(LoginResponse {
            success: true,
            message: MSG_LOGGED_IN.to_string(),
            token,
        })
    }
}
