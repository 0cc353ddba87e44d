//! credgate Configuration Management
//!
//! Configuration is read from environment variables (a `.env` file is
//! loaded by the binaries before this runs). Secrets and database
//! coordinates have no defaults and must be supplied.

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Credential store connection
    pub database: DatabaseConfig,

    /// Token signing configuration
    pub auth: AuthConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Empty values are treated as unset, except `DB_PASS`, which only has
    /// to be present.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| get(key).ok_or_else(|| ConfigError::MissingRequired(key.to_string()));

        // Server
        let mut server = ServerConfig::default();
        if let Some(host) = get("HOST") {
            server.host = host;
        }
        if let Some(port) = get("PORT") {
            server.port = parse_value("PORT", port)?;
        }

        // Store
        let backend = match get("STORE_BACKEND") {
            Some(value) => value.parse()?,
            None => StoreBackend::MySql,
        };

        let database = match backend {
            StoreBackend::MySql => {
                let mut database = DatabaseConfig {
                    backend,
                    host: require("DB_HOST")?,
                    user: require("DB_USER")?,
                    password: lookup("DB_PASS")
                        .ok_or_else(|| ConfigError::MissingRequired("DB_PASS".to_string()))?,
                    name: require("DB_NAME")?,
                    ..DatabaseConfig::default()
                };
                if let Some(port) = get("DB_PORT") {
                    database.port = parse_value("DB_PORT", port)?;
                }
                if let Some(size) = get("DB_POOL_SIZE") {
                    database.pool_size = parse_value("DB_POOL_SIZE", size)?;
                }
                database
            }
            StoreBackend::Memory => DatabaseConfig {
                backend,
                ..DatabaseConfig::default()
            },
        };

        // Token signing
        let mut auth = AuthConfig {
            jwt_secret: require("JWT_SECRET")?,
            ..AuthConfig::default()
        };
        if let Some(secs) = get("JWT_EXPIRATION_SECS") {
            auth.jwt_expiration_secs = parse_value("JWT_EXPIRATION_SECS", secs)?;
        }

        // Logging
        let mut logging = LoggingConfig::default();
        if let Some(level) = get("LOG_LEVEL") {
            logging.level = level;
        }
        if let Some(json) = get("LOG_JSON") {
            logging.json_format = parse_value("LOG_JSON", json)?;
        }

        Ok(Self {
            server,
            database,
            auth,
            logging,
        })
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value,
    })
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Which credential store implementation to run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    MySql,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" => Ok(Self::MySql),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::InvalidValue {
                key: "STORE_BACKEND".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,

    /// MySQL host name
    pub host: String,

    /// MySQL port
    pub port: u16,

    /// MySQL user
    pub user: String,

    /// MySQL password
    #[serde(skip_serializing)]
    pub password: String,

    /// Database (schema) name
    pub name: String,

    /// Maximum pooled connections
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::MySql,
            host: "localhost".to_string(),
            port: 3306,
            user: String::new(),
            password: String::new(),
            name: String::new(),
            pool_size: 10,
        }
    }
}

/// Token signing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC secret for signing tokens
    #[serde(skip_serializing)]
    pub jwt_secret: String,

    /// Token lifetime in seconds (default: 86400 = 24 hours)
    pub jwt_expiration_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_expiration_secs: 24 * 60 * 60,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
