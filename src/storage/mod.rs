pub mod sqlite;

use async_trait::async_trait;
use crate::error::Result;

pub use sqlite::SqliteStore;

/// Durable string key/value storage (the catalog's "local storage")
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite a value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value, returning whether it existed
    async fn remove(&self, key: &str) -> Result<bool>;
}
