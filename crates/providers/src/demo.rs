//! Fixed demo listing used when no real account is connected.

use crate::{DriveFile, DriveOwner, MetadataProvider, ProviderError};
use chrono::{DateTime, Duration, SecondsFormat, Utc};

const DEMO_FILES: &[(&str, &str, &str, &str, i64, &str)] = &[
    (
        "doc1",
        "Project Proposal.docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "2500000",
        2,
        "John Doe",
    ),
    (
        "ppt1",
        "Quarterly Review.pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "5000000",
        5,
        "John Doe",
    ),
    ("img1", "Team Photo.jpg", "image/jpeg", "3000000", 1, "Jane Smith"),
    ("pdf1", "Contract Agreement.pdf", "application/pdf", "1500000", 3, "John Doe"),
    (
        "xls1",
        "Financial Report.xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "1800000",
        4,
        "Jane Smith",
    ),
];

/// Serves the demo Drive listing with modification times relative to `now`.
#[derive(Debug, Clone)]
pub struct DemoDriveProvider {
    now: DateTime<Utc>,
}

impl DemoDriveProvider {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn files(&self) -> Vec<DriveFile> {
        DEMO_FILES
            .iter()
            .map(|(id, name, mime, size, days_ago, owner)| DriveFile {
                id: id.to_string(),
                name: name.to_string(),
                mime_type: Some(mime.to_string()),
                size: Some(size.to_string()),
                modified_time: (self.now - Duration::days(*days_ago))
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
                owners: vec![DriveOwner {
                    display_name: owner.to_string(),
                }],
                tags: Vec::new(),
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl MetadataProvider for DemoDriveProvider {
    async fn list_files(&self) -> Result<Vec<DriveFile>, ProviderError> {
        Ok(self.files())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[tokio::test]
    async fn demo_listing_is_relative_to_now() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let files = DemoDriveProvider::new(now).list_files().await.unwrap();
        assert_eq!(files.len(), 5);
        assert_eq!(files[0].name, "Project Proposal.docx");
        assert_eq!(files[0].modified_time, "2024-03-08T12:00:00.000Z");
        assert_eq!(files[2].owners[0].display_name, "Jane Smith");
    }
}
