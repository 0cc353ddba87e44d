//! Application state management

use crate::auth::{AuthService, JwtConfig, PasswordConfig};
use credgate_core::CredentialStore;
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across handlers
///
/// Built once at startup; the credential store is injected rather than
/// reached through a global.
pub struct AppState {
    /// Registration and login logic
    pub auth: AuthService,
    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        jwt_config: JwtConfig,
        password_config: PasswordConfig,
    ) -> Self {
        Self {
            auth: AuthService::new(store, jwt_config, password_config),
            start_time: Instant::now(),
        }
    }

    /// Credential store backing this instance
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        self.auth.store()
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
