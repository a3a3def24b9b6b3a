use crate::store::KeyValueStore;
use async_trait::async_trait;
use mentionhub_core::{CoreError, StorageError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

const CREATE_KV_TABLE: &str = "CREATE TABLE IF NOT EXISTS kv_entries (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
)";

/// Key-value store persisted in a single SQLite table.
pub struct SqliteStore {
    options: SqliteConnectOptions,
    location: String,
    pool: Option<SqlitePool>,
}

impl SqliteStore {
    /// Parses a `sqlite:` connection string such as `sqlite::memory:`.
    pub fn new(connection_string: &str) -> Result<Self, CoreError> {
        let options = SqliteConnectOptions::from_str(connection_string).map_err(|e| {
            StorageError::ConnectionFailed {
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            options: options.create_if_missing(true),
            location: connection_string.to_string(),
            pool: None,
        })
    }

    /// Addresses the database by file name, so `?` and `#` in the path are literal.
    pub fn with_filename(path: &Path) -> Self {
        Self {
            options: SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true),
            location: path.display().to_string(),
            pool: None,
        }
    }

    /// Connects to (creating if needed) the database file at `path` and migrates it.
    pub async fn open(path: &Path) -> Result<Self, CoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut store = Self::with_filename(path);
        store.connect().await?;
        store.run_migrations().await?;
        Ok(store)
    }

    pub async fn connect(&mut self) -> Result<(), CoreError> {
        // One connection keeps `sqlite::memory:` databases shared across queries.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(self.options.clone())
            .await
            .map_err(|e| StorageError::ConnectionFailed {
                reason: e.to_string(),
            })?;

        info!("Connected to mention cache at {}", self.location);
        self.pool = Some(pool);
        Ok(())
    }

    pub async fn run_migrations(&self) -> Result<(), CoreError> {
        sqlx::query(CREATE_KV_TABLE)
            .execute(self.pool()?)
            .await
            .map_err(|e| StorageError::MigrationFailed {
                migration: format!("create kv_entries: {}", e),
            })?;
        debug!("Mention cache schema is up to date");
        Ok(())
    }

    fn pool(&self) -> Result<&SqlitePool, StorageError> {
        self.pool.as_ref().ok_or(StorageError::NotConnected)
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_entries WHERE key = ?")
            .bind(key)
            .fetch_optional(self.pool()?)
            .await
            .map_err(StorageError::from)?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        sqlx::query(
            "INSERT INTO kv_entries (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(chrono::Utc::now().timestamp())
        .execute(self.pool()?)
        .await
        .map_err(StorageError::from)?;
        debug!("Stored {} bytes under {}", value.len(), key);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CoreError> {
        sqlx::query("DELETE FROM kv_entries WHERE key = ?")
            .bind(key)
            .execute(self.pool()?)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}
