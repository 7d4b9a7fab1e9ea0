//! Key-value storage — the panel's only durable state.
//!
//! Mirrors an extension's local storage area: string keys, JSON values,
//! each individual get/set/remove atomic, no multi-key transactions.
//! `ResumeArchive` and `CredentialStore` are the only callers.

#[cfg(test)]
use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
#[cfg(test)]
use tokio::sync::Mutex;

pub mod json_file;

pub use json_file::JsonFileStore;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Inserts or overwrites unconditionally.
    async fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Every key currently stored, in ascending order.
    async fn keys(&self) -> Result<Vec<String>>;
}

/// In-process store for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, Value>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.lock().await.keys().cloned().collect())
    }
}
