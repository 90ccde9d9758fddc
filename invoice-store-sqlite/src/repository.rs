use std::str::FromStr;

use async_trait::async_trait;
use invoice_core::{RepositoryError, StateRepository};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Opens `database_url`, creating the file when it does not exist.
    ///
    /// Accepts a bare path (`invoice.db`), a `sqlite:` URL, or `:memory:`.
    /// A single connection is used so an in-memory database is shared by
    /// every query.
    pub async fn new(database_url: &str) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| RepositoryError::Configuration(format!("invalid sqlite url '{database_url}': {e}")))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| RepositoryError::Connection(format!("failed to open '{database_url}': {e}")))?;

        debug!(database_url, "sqlite store opened");
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(format!("failed to run migrations: {e}")))?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl StateRepository for SqliteRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        row.map(|row| {
            row.try_get::<String, _>("value")
                .map_err(|e| RepositoryError::Storage(e.to_string()))
        })
        .transpose()
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO kv_store (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        Ok(())
    }
}
