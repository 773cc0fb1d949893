use anyhow::Result;
use async_trait::async_trait;

/// Durable string storage keyed by name, the same shape as a browser's local
/// storage.
#[async_trait]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a key that does not exist is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

pub type KeyValueStoreBox = Box<dyn KeyValueStore + Send + Sync>;
