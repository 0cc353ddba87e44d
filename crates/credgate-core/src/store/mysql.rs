//! MySQL credential store
//!
//! Backed by a bounded `sqlx` connection pool. Uniqueness of username and
//! aadhaar is enforced by the table's UNIQUE keys, so a duplicate insert is
//! reported by the driver rather than checked up front.

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::FromRow;

use super::CredentialStore;
use crate::config::DatabaseConfig;
use crate::{Identity, NewIdentity, StoreError, StoreResult};

/// DDL for the `users` table
pub const USERS_TABLE_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
    username VARCHAR(255) NOT NULL UNIQUE,
    password VARCHAR(255) NOT NULL,
    aadhaar CHAR(12) NOT NULL UNIQUE
)
"#;

/// MySQL credential store
pub struct MySqlCredentialStore {
    pool: MySqlPool,
}

impl MySqlCredentialStore {
    /// Build a pool from configuration and connect
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name);

        let pool = MySqlPoolOptions::new()
            .max_connections(config.pool_size)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Database(format!("MySQL connection failed: {e}")))?;

        tracing::info!(
            host = %config.host,
            database = %config.name,
            pool_size = config.pool_size,
            "MySQL pool connected"
        );

        Ok(Self { pool })
    }
}

/// Lookup query; `id` is cast so signed and unsigned key columns both decode
const SELECT_BY_USERNAME: &str =
    "SELECT CAST(id AS SIGNED) AS id, username, password, aadhaar FROM users WHERE username = ? LIMIT 1";

/// User row from database
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password: String,
    aadhaar: String,
}

impl TryFrom<UserRow> for Identity {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = u64::try_from(row.id)
            .map_err(|_| StoreError::Database(format!("Invalid user id: {}", row.id)))?;

        Ok(Identity {
            id,
            username: row.username,
            password_hash: row.password,
            aadhaar: row.aadhaar,
        })
    }
}

#[async_trait]
impl CredentialStore for MySqlCredentialStore {
    async fn insert_identity(&self, identity: NewIdentity) -> StoreResult<Identity> {
        let result = sqlx::query("INSERT INTO users (username, password, aadhaar) VALUES (?, ?, ?)")
            .bind(&identity.username)
            .bind(&identity.password_hash)
            .bind(&identity.aadhaar)
            .execute(&self.pool)
            .await?;

        Ok(Identity {
            id: result.last_insert_id(),
            username: identity.username,
            password_hash: identity.password_hash,
            aadhaar: identity.aadhaar,
        })
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Identity>> {
        let row = sqlx::query_as::<_, UserRow>(SELECT_BY_USERNAME)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Identity::try_from).transpose()
    }

    async fn create_schema(&self) -> StoreResult<()> {
        sqlx::query(USERS_TABLE_DDL)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "mysql"
    }
}
