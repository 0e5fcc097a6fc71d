use chrono::{DateTime, Utc};
use providers::{null_as_default, DriveFile, FigmaFile};
use serde::{Deserialize, Serialize};

pub const UNKNOWN_MIME: &str = "unknown/unknown";
pub const UNKNOWN_OWNER: &str = "Unknown";
pub const FIGMA_MIME: &str = "application/figma";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
}

/// File metadata as handed over by a provider. Read-only to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub modified_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub owners: Vec<Owner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: TagSet,
}

impl FileRecord {
    pub fn mime_or_unknown(&self) -> &str {
        match self.mime_type.as_deref() {
            Some(m) if !m.is_empty() => m,
            _ => UNKNOWN_MIME,
        }
    }

    pub fn owner_name(&self) -> &str {
        self.owners
            .first()
            .map(|o| o.display_name.as_str())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(UNKNOWN_OWNER)
    }

    pub fn size_bytes(&self) -> u64 {
        self.size
            .as_deref()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(self.modified_time.trim())
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    pub fn lower_name(&self) -> String {
        self.name.to_lowercase()
    }
}

impl From<DriveFile> for FileRecord {
    fn from(f: DriveFile) -> Self {
        let mut tags = TagSet::new();
        for t in f.tags {
            tags.insert(t);
        }
        Self {
            id: f.id,
            name: f.name,
            mime_type: f.mime_type,
            modified_time: f.modified_time,
            owners: f
                .owners
                .into_iter()
                .map(|o| Owner {
                    display_name: o.display_name,
                })
                .collect(),
            size: f.size,
            tags,
        }
    }
}

impl FileRecord {
    /// Design files carry no media type or size of their own; the viewer owns them.
    pub fn from_figma(f: FigmaFile, owner: Option<&str>) -> Self {
        Self {
            id: f.key,
            name: f.name,
            mime_type: Some(FIGMA_MIME.to_string()),
            modified_time: f.last_modified,
            owners: vec![Owner {
                display_name: owner.unwrap_or("You").to_string(),
            }],
            size: Some("0".to_string()),
            tags: TagSet::new(),
        }
    }
}

/// Sorts newest first; records with unparseable timestamps go last. Stable.
pub fn sort_newest_first<T: std::borrow::Borrow<FileRecord>>(files: &mut [T]) {
    files.sort_by(|a, b| {
        b.borrow()
            .modified_at()
            .cmp(&a.borrow().modified_at())
    });
}

/// Combines Drive and Figma listings into one collection, newest first.
pub fn merge_sources(
    drive: Vec<DriveFile>,
    figma: Vec<FigmaFile>,
    figma_owner: Option<&str>,
) -> Vec<FileRecord> {
    let mut all: Vec<FileRecord> = drive.into_iter().map(FileRecord::from).collect();
    all.extend(figma.into_iter().map(|f| FileRecord::from_figma(f, figma_owner)));
    sort_newest_first(&mut all);
    all
}

/// Tags with set membership and insertion-ordered display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the tag was already present.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.contains(&tag) {
            return false;
        }
        self.0.push(tag);
        true
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|t| t != tag);
        self.0.len() != before
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for TagSet {
    fn from(tags: Vec<String>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<TagSet> for Vec<String> {
    fn from(tags: TagSet) -> Self {
        tags.0
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for t in iter {
            set.insert(t);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_fall_back_to_neutral_defaults() {
        let file: FileRecord =
            serde_json::from_str(r#"{"id":"f1","name":"Logo.fig","modifiedTime":"nope"}"#).unwrap();
        assert_eq!(file.mime_or_unknown(), UNKNOWN_MIME);
        assert_eq!(file.owner_name(), UNKNOWN_OWNER);
        assert_eq!(file.size_bytes(), 0);
        assert!(file.tags.is_empty());
        assert!(file.modified_at().is_none());
    }

    #[test]
    fn null_fields_degrade_like_missing_ones() {
        let file: FileRecord = serde_json::from_str(
            r#"{"id":"f2","name":"Plan","modifiedTime":null,"owners":null,"tags":null,"size":null}"#,
        )
        .unwrap();
        assert_eq!(file.owner_name(), UNKNOWN_OWNER);
        assert!(file.tags.is_empty());
        assert_eq!(file.size_bytes(), 0);
        assert!(file.modified_at().is_none());
    }

    #[test]
    fn tag_set_keeps_first_insertion_order() {
        let tags: TagSet = ["b", "a", "b", "c"].into_iter().collect();
        assert_eq!(tags.as_slice(), &["b", "a", "c"]);
        let json = serde_json::to_string(&tags).unwrap();
        assert_eq!(json, r#"["b","a","c"]"#);
    }

    #[test]
    fn merge_puts_newest_first_and_figma_gets_defaults() {
        let drive = vec![DriveFile {
            id: "d".into(),
            name: "Old.pdf".into(),
            mime_type: Some("application/pdf".into()),
            modified_time: "2024-01-01T00:00:00Z".into(),
            ..Default::default()
        }];
        let figma = vec![FigmaFile {
            key: "k".into(),
            name: "Wireframes".into(),
            last_modified: "2024-02-01T00:00:00Z".into(),
            thumbnail_url: None,
        }];
        let all = merge_sources(drive, figma, None);
        assert_eq!(all[0].id, "k");
        assert_eq!(all[0].mime_or_unknown(), FIGMA_MIME);
        assert_eq!(all[0].owner_name(), "You");
        assert_eq!(all[1].id, "d");
    }
}
