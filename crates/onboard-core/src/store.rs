//! Key/value persistence for drafts.
//!
//! The wizard never touches storage directly: it goes through a
//! [`DraftStore`], which serializes drafts and hands them to an injected
//! [`KeyValueStore`]. Two stores ship with the crate:
//!
//! - [`MemoryStore`]: process-local map, used by tests and `--ephemeral`
//! - [`SqliteStore`]: single-table SQLite file, the CLI default

use async_trait::async_trait;

use crate::error::Result;

pub mod drafts;
pub mod memory;
pub mod sqlite;

pub use drafts::DraftStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Generic string key/value capability.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Creates or overwrites the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}
