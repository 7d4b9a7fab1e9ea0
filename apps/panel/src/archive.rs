use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::errors::PanelError;
use crate::models::{JobEntry, SavedResume};
use crate::storage::KeyValueStore;

/// Every saved résumé lives under this key prefix.
pub const RECORD_PREFIX: &str = "resume_";

/// Storage key for a display name: the prefix followed by the literal name.
pub fn record_key(display_name: &str) -> String {
    format!("{RECORD_PREFIX}{display_name}")
}

/// Named snapshots of job lists, kept in the shared key-value store.
///
/// The index is never cached; `list` rescans the store every time.
#[derive(Clone)]
pub struct ResumeArchive {
    store: Arc<dyn KeyValueStore>,
}

impl ResumeArchive {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<SavedResume>, PanelError> {
        Ok(self
            .store
            .keys()
            .await?
            .into_iter()
            .filter_map(|key| {
                let display_name = key.strip_prefix(RECORD_PREFIX)?.to_string();
                Some(SavedResume { key, display_name })
            })
            .collect())
    }

    pub async fn load(&self, key: &str) -> Result<Option<Vec<JobEntry>>, PanelError> {
        let Some(value) = self.store.get(key).await? else {
            return Ok(None);
        };
        let jobs = serde_json::from_value(value)
            .with_context(|| format!("Saved resume '{key}' is not a job list"))?;
        Ok(Some(jobs))
    }

    pub async fn exists(&self, key: &str) -> Result<bool, PanelError> {
        Ok(self.store.get(key).await?.is_some())
    }

    /// Writes `jobs` under the name's key, overwriting unconditionally.
    /// Returns the key written.
    pub async fn save(&self, display_name: &str, jobs: &[JobEntry]) -> Result<String, PanelError> {
        let key = record_key(display_name);
        let value = serde_json::to_value(jobs).context("Failed to serialize job list")?;
        self.store.set(&key, value).await?;
        info!("Saved resume '{display_name}' ({} jobs)", jobs.len());
        Ok(key)
    }

    /// Removing a key that does not exist is a no-op.
    pub async fn delete(&self, key: &str) -> Result<(), PanelError> {
        self.store.remove(key).await?;
        info!("Deleted resume {key}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::CREDENTIAL_KEY;
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn archive() -> (Arc<MemoryStore>, ResumeArchive) {
        let kv = Arc::new(MemoryStore::new());
        (kv.clone(), ResumeArchive::new(kv))
    }

    fn jobs() -> Vec<JobEntry> {
        vec![
            JobEntry {
                company: Some("Acme Corp".to_string()),
                title: Some("Software Engineer".to_string()),
                ..Default::default()
            },
            JobEntry {
                company: Some("Globex".to_string()),
                description: Some("<raw & unescaped>".to_string()),
                ..Default::default()
            },
        ]
    }

    #[tokio::test]
    async fn test_save_then_load_returns_jobs_unchanged() {
        let (_kv, archive) = archive();
        let key = archive.save("Acme Resume", &jobs()).await.unwrap();

        assert_eq!(key, "resume_Acme Resume");
        assert_eq!(archive.load(&record_key("Acme Resume")).await.unwrap(), Some(jobs()));
    }

    #[tokio::test]
    async fn test_list_only_includes_prefixed_keys() {
        let (kv, archive) = archive();
        kv.set(CREDENTIAL_KEY, json!("secret")).await.unwrap();
        archive.save("Resume 1", &jobs()).await.unwrap();
        archive.save("Backend roles", &[]).await.unwrap();

        let names: Vec<_> = archive
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.display_name)
            .collect();
        assert_eq!(names, vec!["Backend roles", "Resume 1"]);
    }

    #[tokio::test]
    async fn test_same_name_overwrites() {
        let (_kv, archive) = archive();
        archive.save("Resume 1", &jobs()).await.unwrap();
        archive.save("Resume 1", &jobs()[..1]).await.unwrap();

        assert_eq!(archive.list().await.unwrap().len(), 1);
        assert_eq!(archive.load("resume_Resume 1").await.unwrap().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_key_leaves_index_unchanged() {
        let (_kv, archive) = archive();
        archive.save("Keep", &jobs()).await.unwrap();
        let before = archive.list().await.unwrap();

        archive.delete("resume_Nope").await.unwrap();
        assert_eq!(archive.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_and_load_missing() {
        let (_kv, archive) = archive();
        let key = archive.save("Gone", &jobs()).await.unwrap();
        assert!(archive.exists(&key).await.unwrap());

        archive.delete(&key).await.unwrap();
        assert!(!archive.exists(&key).await.unwrap());
        assert_eq!(archive.load(&key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_load_non_list_value_is_storage_error() {
        let (kv, archive) = archive();
        kv.set("resume_Broken", json!("not a list")).await.unwrap();

        let err = archive.load("resume_Broken").await.unwrap_err();
        assert!(matches!(err, PanelError::Storage(_)));
    }
}
