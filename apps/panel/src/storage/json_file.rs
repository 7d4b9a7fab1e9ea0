use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::KeyValueStore;

/// Whole-store JSON file: one object whose members are the stored keys.
///
/// The file is read once on open and rewritten after every mutation. Writes
/// land in a sibling temp file first and are renamed over the original.
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, Value>>,
}

impl JsonFileStore {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("Store file {} is not a JSON object", path.display()))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No store at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Error reading {}", path.display()))
            }
        };
        debug!("Opened store {} with {} keys", path.display(), entries.len());

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, entries: &BTreeMap<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Error ensuring path {} exists", parent.display()))?;
        }

        let body = serde_json::to_vec_pretty(entries)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, body)
            .await
            .with_context(|| format!("Error writing {}", tmp.display()))?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e).with_context(|| format!("Error replacing {}", self.path.display()));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    // Mutations are staged on a copy; memory only changes once disk has.
    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut entries = self.entries.lock().await;
        let mut staged = entries.clone();
        staged.insert(key.to_string(), value);
        self.persist(&staged).await?;
        *entries = staged;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().await;
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut staged = entries.clone();
        staged.remove(key);
        self.persist(&staged).await?;
        *entries = staged;
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.lock().await.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let store = JsonFileStore::open(&path).await.unwrap();
        store.set("user_api_key", json!("secret")).await.unwrap();
        store
            .set("resume_Acme", json!([{"company": "Acme"}]))
            .await
            .unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.get("user_api_key").await.unwrap(),
            Some(json!("secret"))
        );
        assert_eq!(
            reopened.keys().await.unwrap(),
            vec!["resume_Acme".to_string(), "user_api_key".to_string()]
        );
    }

    #[tokio::test]
    async fn test_remove_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let store = JsonFileStore::open(&path).await.unwrap();
        store.set("k", json!(1)).await.unwrap();
        store.remove("k").await.unwrap();
        store.remove("missing").await.unwrap();

        let reopened = JsonFileStore::open(&path).await.unwrap();
        assert_eq!(reopened.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let store = JsonFileStore::open(&path).await.unwrap();
        store.set("user_api_key", json!("secret")).await.unwrap();

        // A non-empty directory where the file lives makes the rename fail.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("occupied"), "x").unwrap();

        assert!(store
            .set("resume_Acme", json!([{"company": "Acme"}]))
            .await
            .is_err());
        assert_eq!(store.get("resume_Acme").await.unwrap(), None);
        assert_eq!(store.keys().await.unwrap(), vec!["user_api_key".to_string()]);

        assert!(store.remove("user_api_key").await.is_err());
        assert_eq!(store.get("user_api_key").await.unwrap(), Some(json!("secret")));

        assert!(!dir.path().join("storage.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        assert!(JsonFileStore::open(&path).await.is_err());
    }
}
