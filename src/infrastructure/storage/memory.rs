use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::models::KeyValueStore;

/// In-memory store. Clones share the same values, so a test can keep a handle
/// on what was persisted.
#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Arc<DashMap<String, String>>,
}

impl MemoryStore {
    pub fn with_value(key: &str, value: &str) -> MemoryStore {
        let store = MemoryStore::default();
        store.values.insert(key.to_string(), value.to_string());
        return store;
    }

    pub fn contains(&self, key: &str) -> bool {
        return self.values.contains_key(key);
    }

    pub fn value(&self, key: &str) -> Option<String> {
        return self.values.get(key).map(|value| return value.to_string());
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    #[allow(clippy::implicit_return)]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        return Ok(self.values.get(key).map(|value| return value.to_string()));
    }

    #[allow(clippy::implicit_return)]
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn remove(&self, key: &str) -> Result<()> {
        self.values.remove(key);
        return Ok(());
    }
}
