//! JWT token issuance and validation
//!
//! Tokens are HMAC-SHA256 signed with a shared secret and carry the
//! identity's numeric id and username.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Default token lifetime: 24 hours
pub const DEFAULT_EXPIRATION_SECS: u64 = 24 * 60 * 60;

/// Claims embedded in an issued token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identity id assigned by the credential store
    pub id: u64,
    pub username: String,
    /// Token issuer (always "credgate")
    pub iss: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: u64,
    /// Expiration timestamp (Unix epoch)
    pub exp: u64,
}

/// JWT generation and validation errors
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode JWT: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid token format")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("System time error: {0}")]
    SystemTimeError(#[from] std::time::SystemTimeError),

    #[error("Token expiration of {0}s is out of range")]
    ExpirationOverflow(u64),
}

/// Signing configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared secret for HMAC signing
    pub secret: String,
    /// Token lifetime in seconds
    pub expiration_secs: u64,
    /// Token issuer identifier
    pub issuer: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiration_secs: DEFAULT_EXPIRATION_SECS,
            issuer: "credgate".to_string(),
        }
    }

    pub fn from_auth_config(config: &credgate_core::AuthConfig) -> Self {
        Self {
            expiration_secs: config.jwt_expiration_secs,
            ..Self::new(config.jwt_secret.clone())
        }
    }
}

/// Issue a signed token for an authenticated identity
pub fn issue_token(config: &JwtConfig, id: u64, username: &str) -> Result<String, JwtError> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let exp = now
        .checked_add(config.expiration_secs)
        .ok_or(JwtError::ExpirationOverflow(config.expiration_secs))?;

    let claims = Claims {
        id,
        username: username.to_string(),
        iss: config.issuer.clone(),
        iat: now,
        exp,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(token)
}

/// Validate a token's signature, issuer and expiry and return its claims
pub fn validate_token(config: &JwtConfig, token: &str) -> Result<Claims, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidSignature,
        _ => JwtError::InvalidToken,
    })?;

    Ok(token_data.claims)
}
