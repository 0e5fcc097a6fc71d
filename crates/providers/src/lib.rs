//! File metadata providers: wire shapes and the sources that produce them.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

pub mod demo;
pub mod json;
pub mod noop;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed provider payload: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
}

/// Treats an explicit `null` like a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveOwner {
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
}

/// A file entry as returned by a Drive-style listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub modified_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub owners: Vec<DriveOwner>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

/// A design file entry as returned by a Figma-style listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaFile {
    pub key: String,
    pub name: String,
    pub last_modified: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn list_files(&self) -> Result<Vec<DriveFile>, ProviderError>;
}

#[derive(Default, Clone)]
pub struct ProviderRegistry {
    sources: HashMap<String, Arc<dyn MetadataProvider>>,
    pub preferred: Option<String>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, name: &str, provider: Arc<dyn MetadataProvider>) -> Self {
        self.sources.insert(name.to_string(), provider);
        self
    }

    pub fn set_preferred(mut self, name: &str) -> Self {
        self.preferred = Some(name.to_string());
        self
    }

    pub fn source(&self, name: Option<&str>) -> Result<Arc<dyn MetadataProvider>, ProviderError> {
        let key = name
            .map(str::to_string)
            .or_else(|| self.preferred.clone())
            .ok_or_else(|| ProviderError::UnknownProvider("no metadata provider configured".into()))?;
        self.sources
            .get(&key)
            .cloned()
            .ok_or(ProviderError::UnknownProvider(key))
    }
}
