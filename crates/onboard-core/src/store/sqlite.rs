//! SQLite-backed key/value store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension};
use tokio::task;

use super::KeyValueStore;
use crate::error::{DatabaseResultExt, OnboardError, Result};

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS drafts (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";
const SELECT_SQL: &str = "SELECT value FROM drafts WHERE key = ?1";
const UPSERT_SQL: &str = "INSERT INTO drafts (key, value, updated_at) VALUES (?1, ?2, ?3)
    ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const DELETE_SQL: &str = "DELETE FROM drafts WHERE key = ?1";

/// Store persisting every key as a row of a single `drafts` table.
///
/// Each call opens its own connection on a blocking thread, so the store
/// itself only holds the database path.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    /// Opens (and creates if needed) the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns `OnboardError::FileSystem` if the parent directory cannot be
    /// created and `OnboardError::Database` if the schema cannot be applied.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| OnboardError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let store = Self { db_path };
        store.with_connection(|_| Ok(())).await?;
        Ok(store)
    }

    /// Default location following the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/onboard/drafts.db`.
    pub fn default_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("onboard")
            .place_data_file("drafts.db")
            .map_err(|e| OnboardError::XdgDirectory(e.to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    async fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let connection =
                Connection::open(&db_path).db_context("Failed to open draft database")?;
            connection
                .execute_batch(CREATE_TABLE_SQL)
                .db_context("Failed to initialize draft schema")?;
            f(&connection)
        })
        .await
        .map_err(OnboardError::join)?
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.with_connection(move |conn| {
            conn.query_row(SELECT_SQL, params![key], |row| row.get(0))
                .optional()
                .db_context("Failed to read draft")
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let key = key.to_string();
        let value = value.to_string();
        self.with_connection(move |conn| {
            let now = Timestamp::now().to_string();
            conn.execute(UPSERT_SQL, params![key, value, now])
                .db_context("Failed to write draft")?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.with_connection(move |conn| {
            conn.execute(DELETE_SQL, params![key])
                .db_context("Failed to delete draft")?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_sqlite_store_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = SqliteStore::open(temp_dir.path().join("nested/drafts.db"))
            .await
            .expect("Failed to open store");

        assert_eq!(store.get("draft_ops").await.unwrap(), None);

        store.set("draft_ops", "first").await.unwrap();
        store.set("draft_ops", "second").await.unwrap();
        assert_eq!(
            store.get("draft_ops").await.unwrap().as_deref(),
            Some("second")
        );

        store.delete("draft_ops").await.unwrap();
        assert_eq!(store.get("draft_ops").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sqlite_store_persists_across_instances() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("drafts.db");

        let store = SqliteStore::open(&path).await.unwrap();
        store.set("draft_admin", "{\"x\":1}").await.unwrap();
        drop(store);

        let reopened = SqliteStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.get("draft_admin").await.unwrap().as_deref(),
            Some("{\"x\":1}")
        );
    }
}
