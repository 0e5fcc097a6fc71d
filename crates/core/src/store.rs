//! Collaborator seams for persisting user edits: tags, names and preferences.

use crate::models::{FileRecord, TagSet};
use crate::naming::{NamingConvention, NamingPreferences, NAMING_PREFERENCE_KEY};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;
use storage::{SqliteStore, StoredFile};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("store backend failed: {0}")]
    Backend(String),
}

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        StoreError::Backend(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait MetadataStore: Send + Sync {
    /// Upserts by id. A record without tags keeps whatever tags are stored.
    async fn sync_files(&self, files: &[FileRecord]) -> Result<(), StoreError>;
    async fn update_tags(&self, id: &str, tags: &TagSet) -> Result<(), StoreError>;
    async fn update_name(&self, id: &str, name: &str) -> Result<(), StoreError>;
    async fn tags(&self, id: &str) -> Result<Option<TagSet>, StoreError>;
}

#[async_trait::async_trait]
pub trait PreferenceStore: Send + Sync {
    /// `None` until a preference has been saved.
    async fn load_naming(&self) -> Result<Option<NamingPreferences>, StoreError>;
    async fn save_naming(&self, prefs: &NamingPreferences) -> Result<(), StoreError>;
}

/// In-process store; nothing outlives the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: Mutex<HashMap<String, FileRecord>>,
    naming: Mutex<Option<NamingPreferences>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<FileRecord> {
        self.files.lock().ok()?.get(id).cloned()
    }

    fn files(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, FileRecord>>, StoreError> {
        self.files
            .lock()
            .map_err(|_| StoreError::Backend("memory store poisoned".into()))
    }
}

#[async_trait::async_trait]
impl MetadataStore for MemoryStore {
    async fn sync_files(&self, files: &[FileRecord]) -> Result<(), StoreError> {
        let mut stored = self.files()?;
        for file in files {
            let mut next = file.clone();
            if next.tags.is_empty() {
                if let Some(prev) = stored.get(&file.id) {
                    next.tags = prev.tags.clone();
                }
            }
            stored.insert(file.id.clone(), next);
        }
        Ok(())
    }

    async fn update_tags(&self, id: &str, tags: &TagSet) -> Result<(), StoreError> {
        let mut stored = self.files()?;
        let file = stored
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        file.tags = tags.clone();
        Ok(())
    }

    async fn update_name(&self, id: &str, name: &str) -> Result<(), StoreError> {
        let mut stored = self.files()?;
        let file = stored
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        file.name = name.to_string();
        Ok(())
    }

    async fn tags(&self, id: &str) -> Result<Option<TagSet>, StoreError> {
        Ok(self.files()?.get(id).map(|f| f.tags.clone()))
    }
}

#[async_trait::async_trait]
impl PreferenceStore for MemoryStore {
    async fn load_naming(&self) -> Result<Option<NamingPreferences>, StoreError> {
        let naming = self
            .naming
            .lock()
            .map_err(|_| StoreError::Backend("memory store poisoned".into()))?;
        Ok(*naming)
    }

    async fn save_naming(&self, prefs: &NamingPreferences) -> Result<(), StoreError> {
        let mut naming = self
            .naming
            .lock()
            .map_err(|_| StoreError::Backend("memory store poisoned".into()))?;
        *naming = Some(*prefs);
        Ok(())
    }
}

fn to_row(file: &FileRecord, synced_at: &str) -> Result<StoredFile, StoreError> {
    Ok(StoredFile {
        id: file.id.clone(),
        name: file.name.clone(),
        mime_type: file.mime_type.clone(),
        size: i64::try_from(file.size_bytes()).unwrap_or(i64::MAX),
        modified_time: Some(file.modified_time.clone()).filter(|t| !t.is_empty()),
        tags_json: serde_json::to_string(file.tags.as_slice())
            .map_err(|e| StoreError::Backend(e.to_string()))?,
        last_synced: Some(synced_at.to_string()),
    })
}

#[async_trait::async_trait]
impl MetadataStore for SqliteStore {
    async fn sync_files(&self, files: &[FileRecord]) -> Result<(), StoreError> {
        let synced_at = Utc::now().to_rfc3339();
        for file in files {
            self.upsert_file(&to_row(file, &synced_at)?).await?;
        }
        Ok(())
    }

    async fn update_tags(&self, id: &str, tags: &TagSet) -> Result<(), StoreError> {
        if self.write_tags(id, tags.as_slice()).await? {
            Ok(())
        } else {
            Err(StoreError::NotFound(id.to_string()))
        }
    }

    async fn update_name(&self, id: &str, name: &str) -> Result<(), StoreError> {
        if self.write_name(id, name).await? {
            Ok(())
        } else {
            Err(StoreError::NotFound(id.to_string()))
        }
    }

    async fn tags(&self, id: &str) -> Result<Option<TagSet>, StoreError> {
        Ok(self.load_tags(id).await?.map(TagSet::from))
    }
}

#[async_trait::async_trait]
impl PreferenceStore for SqliteStore {
    async fn load_naming(&self) -> Result<Option<NamingPreferences>, StoreError> {
        let Some(raw) = self.get_preference(NAMING_PREFERENCE_KEY).await? else {
            return Ok(None);
        };
        match raw.parse::<NamingConvention>() {
            Ok(convention) => Ok(Some(NamingPreferences { convention })),
            Err(err) => {
                warn!(%err, "ignoring stored naming preference");
                Ok(None)
            }
        }
    }

    async fn save_naming(&self, prefs: &NamingPreferences) -> Result<(), StoreError> {
        self.set_preference(NAMING_PREFERENCE_KEY, prefs.convention.as_str())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, tags: &[&str]) -> FileRecord {
        FileRecord {
            id: id.to_string(),
            name: format!("{id}.docx"),
            modified_time: "2024-05-01T00:00:00Z".to_string(),
            size: Some("42".to_string()),
            tags: tags.iter().copied().collect(),
            ..Default::default()
        }
    }

    async fn exercise(store: &(impl MetadataStore + PreferenceStore)) {
        store.sync_files(&[record("a", &["mine"])]).await.unwrap();
        store.sync_files(&[record("a", &[])]).await.unwrap();
        assert_eq!(
            store.tags("a").await.unwrap().unwrap().as_slice(),
            &["mine"]
        );

        let tags: TagSet = ["x", "y"].into_iter().collect();
        store.update_tags("a", &tags).await.unwrap();
        assert_eq!(store.tags("a").await.unwrap(), Some(tags));
        store.update_name("a", "2024-05-01_plan.docx").await.unwrap();

        assert!(matches!(
            store.update_name("missing", "x").await,
            Err(StoreError::NotFound(id)) if id == "missing"
        ));
        assert_eq!(store.tags("missing").await.unwrap(), None);

        assert_eq!(store.load_naming().await.unwrap(), None);
        let prefs = NamingPreferences {
            convention: NamingConvention::KebabCase,
        };
        store.save_naming(&prefs).await.unwrap();
        assert_eq!(store.load_naming().await.unwrap(), Some(prefs));
    }

    #[tokio::test]
    async fn memory_store_behaves_like_a_store() {
        let store = MemoryStore::new();
        exercise(&store).await;
        assert_eq!(store.get("a").unwrap().name, "2024-05-01_plan.docx");
    }

    #[tokio::test]
    async fn sqlite_store_behaves_like_a_store() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("meta.db");
        let store = SqliteStore::open(&db.to_string_lossy()).await.unwrap();
        exercise(&store).await;
        let row = store.get_file("a").await.unwrap().unwrap();
        assert_eq!(row.name, "2024-05-01_plan.docx");
        assert_eq!(row.size, 42);
    }

    #[tokio::test]
    async fn unreadable_stored_convention_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("meta.db");
        let store = SqliteStore::open(&db.to_string_lossy()).await.unwrap();
        store
            .set_preference(NAMING_PREFERENCE_KEY, "Title Case")
            .await
            .unwrap();
        assert_eq!(store.load_naming().await.unwrap(), None);
    }
}
