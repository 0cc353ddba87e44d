//! credgate CLI - operator utilities
//!
//! Usage:
//!   credgate init-db
//!   credgate check-db
//!   credgate schema
//!   credgate inspect-token <token>

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use credgate_api::auth::{validate_token, JwtConfig};
use credgate_core::store::USERS_TABLE_DDL;
use credgate_core::{CredentialStore, DatabaseConfig, MySqlCredentialStore, StoreBackend};

#[derive(Parser)]
#[command(name = "credgate")]
#[command(about = "credgate operator utilities")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the users table if it does not exist
    InitDb(DbArgs),
    /// Check that the database is reachable
    CheckDb(DbArgs),
    /// Print the users table DDL
    Schema,
    /// Validate a token and print its claims
    InspectToken {
        /// Token returned by /login
        token: String,
        /// Signing secret
        #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
        secret: String,
    },
}

/// MySQL connection arguments
#[derive(Args)]
struct DbArgs {
    #[arg(long, env = "DB_HOST")]
    host: String,
    #[arg(long, env = "DB_PORT", default_value_t = 3306)]
    port: u16,
    #[arg(long, env = "DB_USER")]
    user: String,
    /// May be empty for passwordless accounts
    #[arg(long, env = "DB_PASS", hide_env_values = true, default_value = "")]
    password: String,
    #[arg(long, env = "DB_NAME")]
    database: String,
}

impl From<DbArgs> for DatabaseConfig {
    fn from(args: DbArgs) -> Self {
        DatabaseConfig {
            backend: StoreBackend::MySql,
            host: args.host,
            port: args.port,
            user: args.user,
            password: args.password,
            name: args.database,
            pool_size: 1,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::InitDb(args) => {
            let config = DatabaseConfig::from(args);
            tracing::info!(host = %config.host, database = %config.name, "Creating users table");
            let store = MySqlCredentialStore::connect(&config).await?;
            // Driver detail is printed as-is
            store
                .create_schema()
                .await
                .context("Failed to create users table")?;
            tracing::info!(database = %config.name, "users table ready");
            println!("users table ready in database '{}'", config.name);
        }
        Commands::CheckDb(args) => {
            let config = DatabaseConfig::from(args);
            tracing::info!(host = %config.host, port = config.port, "Checking database");
            let store = MySqlCredentialStore::connect(&config).await?;
            store.ping().await.context("Database ping failed")?;
            tracing::info!(database = %config.name, "Database reachable");
            println!("database '{}' on {}:{} is reachable", config.name, config.host, config.port);
        }
        Commands::Schema => {
            println!("{}", USERS_TABLE_DDL.trim());
        }
        Commands::InspectToken { token, secret } => {
            tracing::debug!("Validating token");
            let claims = validate_token(&JwtConfig::new(secret), &token)
                .context("Token rejected")?;
            println!("{}", serde_json::to_string_pretty(&claims)?);
        }
    }

    Ok(())
}
