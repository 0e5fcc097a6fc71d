use crate::{DriveFile, MetadataProvider, ProviderError};

#[derive(Debug, Default)]
pub struct NoopProvider;

#[async_trait::async_trait]
impl MetadataProvider for NoopProvider {
    async fn list_files(&self) -> Result<Vec<DriveFile>, ProviderError> {
        Ok(Vec::new())
    }
}
