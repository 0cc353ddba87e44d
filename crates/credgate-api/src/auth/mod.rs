//! Authentication module
//!
//! - Password hashing with Argon2
//! - Token issuance and validation (JWT, HS256)
//! - Authentication service for registration and login

pub mod jwt;
pub mod password;
pub mod service;

pub use jwt::{issue_token, validate_token, Claims, JwtConfig, JwtError};
pub use password::{hash_password, verify_password, PasswordConfig, PasswordError};
pub use service::{AuthService, LoginRequest, LoginResponse, SignupRequest, SignupResponse};
