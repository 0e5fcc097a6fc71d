use crate::error::ParseError;
use crate::models::{sort_newest_first, FileRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const FOLDER_MIME: &str = "application/vnd.google-apps.folder";
pub const DEFAULT_LIST_LIMIT: usize = 9;
pub const DEFAULT_OVERVIEW_LIMIT: usize = 8;

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewFilter {
    #[default]
    All,
    Folders,
    Files,
    Images,
    Documents,
    Others,
}

impl ViewFilter {
    pub fn matches(self, file: &FileRecord) -> bool {
        let mime = file.mime_or_unknown();
        let is_folder = mime == FOLDER_MIME;
        let is_image = mime.starts_with("image/");
        let is_document = mime.contains("document") || mime.contains("pdf");
        match self {
            ViewFilter::All => true,
            ViewFilter::Folders => is_folder,
            ViewFilter::Files => !is_folder,
            ViewFilter::Images => is_image,
            ViewFilter::Documents => is_document,
            ViewFilter::Others => !is_image && !is_document && !is_folder,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ViewFilter::All => "all",
            ViewFilter::Folders => "folders",
            ViewFilter::Files => "files",
            ViewFilter::Images => "images",
            ViewFilter::Documents => "documents",
            ViewFilter::Others => "others",
        }
    }
}

impl FromStr for ViewFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(ViewFilter::All),
            "folders" => Ok(ViewFilter::Folders),
            "files" => Ok(ViewFilter::Files),
            "images" => Ok(ViewFilter::Images),
            "documents" => Ok(ViewFilter::Documents),
            "others" => Ok(ViewFilter::Others),
            other => Err(ParseError::ViewFilter(other.to_string())),
        }
    }
}

impl fmt::Display for ViewFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn filter_view(files: &[FileRecord], filter: ViewFilter) -> Vec<&FileRecord> {
    files.iter().filter(|f| filter.matches(f)).collect()
}

/// The `limit` most recently modified files, newest first.
pub fn recent_files(files: &[FileRecord], limit: usize) -> Vec<&FileRecord> {
    let mut sorted: Vec<&FileRecord> = files.iter().collect();
    sort_newest_first(&mut sorted);
    sorted.truncate(limit);
    sorted
}

/// Newest `limit` files first, then the view filter over that window.
pub fn recent_view(files: &[FileRecord], limit: usize, filter: ViewFilter) -> Vec<&FileRecord> {
    recent_files(files, limit)
        .into_iter()
        .filter(|f| filter.matches(f))
        .collect()
}

pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, SIZE_UNITS[unit])
}
