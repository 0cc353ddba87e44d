//! credgate API Server
//!
//! Reads configuration from the environment (and `.env`), connects the
//! credential store and serves `/signup` and `/login`.

use credgate_api::{
    auth::{JwtConfig, PasswordConfig},
    create_router,
    state::AppState,
};
use credgate_core::{
    AppConfig, CredentialStore, InMemoryCredentialStore, LoggingConfig, MySqlCredentialStore,
    StoreBackend,
};
use std::sync::Arc;

fn init_tracing(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "credgate_api={0},credgate_core={0},tower_http={0}",
            config.level
        )
        .into()
    });

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(&config.logging);

    let store: Arc<dyn CredentialStore> = match config.database.backend {
        StoreBackend::MySql => Arc::new(MySqlCredentialStore::connect(&config.database).await?),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory credential store; identities are lost on restart");
            Arc::new(InMemoryCredentialStore::new())
        }
    };

    let state = Arc::new(AppState::new(
        store,
        JwtConfig::from_auth_config(&config.auth),
        PasswordConfig::default(),
    ));

    let app = create_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("credgate API server running on http://{}", addr);
    tracing::info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
