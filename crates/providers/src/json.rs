use crate::{DriveFile, FigmaFile, MetadataProvider, ProviderError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads a Drive-shaped listing (a JSON array) from disk.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl MetadataProvider for JsonFileProvider {
    async fn list_files(&self) -> Result<Vec<DriveFile>, ProviderError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let files: Vec<DriveFile> = serde_json::from_str(&raw)?;
        debug!(path = %self.path.display(), count = files.len(), "loaded listing");
        Ok(files)
    }
}

/// Reads a Figma-shaped listing (a JSON array of design files).
pub async fn read_figma_listing(path: &Path) -> Result<Vec<FigmaFile>, ProviderError> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}
