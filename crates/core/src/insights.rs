//! Collection-level insights: duplicate names, sensitive files, per-owner
//! access and a suggested folder layout by media type.
//!
//! Each part is computed independently over the same input slice. Output
//! collections keep first-seen order.

use crate::models::FileRecord;
use crate::rules::{name_matches_any, SENSITIVE_PATTERNS};
use serde::Serialize;

const UNKNOWN_SEGMENT: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightSummary<'a> {
    pub duplicates: Vec<String>,
    pub sensitive_files: Vec<&'a FileRecord>,
    pub access_map: Vec<OwnerAccess<'a>>,
    pub folder_structure: Vec<CategoryFolder>,
}

/// Files attributed to one owner. `shared` is part of the report shape but no
/// current source supplies sharing data, so it is always empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerAccess<'a> {
    pub owner: String,
    pub owned: Vec<&'a FileRecord>,
    pub shared: Vec<&'a FileRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryFolder {
    pub category: String,
    pub subtypes: Vec<SubtypeFolder>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtypeFolder {
    pub subtype: String,
    pub files: Vec<String>,
}

impl<'a> InsightSummary<'a> {
    pub fn owner(&self, name: &str) -> Option<&OwnerAccess<'a>> {
        self.access_map.iter().find(|o| o.owner == name)
    }

    pub fn folder(&self, category: &str, subtype: &str) -> Option<&[String]> {
        self.folder_structure
            .iter()
            .find(|c| c.category == category)?
            .subtypes
            .iter()
            .find(|s| s.subtype == subtype)
            .map(|s| s.files.as_slice())
    }
}

pub fn analyze(files: &[FileRecord]) -> InsightSummary<'_> {
    analyze_with(files, SENSITIVE_PATTERNS)
}

pub fn analyze_with<'a, S: AsRef<str>>(
    files: &'a [FileRecord],
    sensitive_patterns: &[S],
) -> InsightSummary<'a> {
    InsightSummary {
        duplicates: duplicate_names(files),
        sensitive_files: sensitive_files(files, sensitive_patterns),
        access_map: access_map(files),
        folder_structure: folder_structure(files),
    }
}

/// Lower-cased names seen before; one entry per repeat beyond the first.
pub fn duplicate_names(files: &[FileRecord]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    files
        .iter()
        .map(FileRecord::lower_name)
        .filter(|name| !seen.insert(name.clone()))
        .collect()
}

pub fn sensitive_files<'a, S: AsRef<str>>(
    files: &'a [FileRecord],
    patterns: &[S],
) -> Vec<&'a FileRecord> {
    files
        .iter()
        .filter(|f| name_matches_any(&f.lower_name(), patterns))
        .collect()
}

pub fn access_map(files: &[FileRecord]) -> Vec<OwnerAccess<'_>> {
    let mut owners: Vec<OwnerAccess<'_>> = Vec::new();
    for file in files {
        let owner = file.owner_name();
        match owners.iter_mut().find(|o| o.owner == owner) {
            Some(entry) => entry.owned.push(file),
            None => owners.push(OwnerAccess {
                owner: owner.to_string(),
                owned: vec![file],
                shared: Vec::new(),
            }),
        }
    }
    owners
}

/// `(category, subtype)` of a media type, or `unknown/unknown` when either half is missing.
pub fn split_mime(mime: Option<&str>) -> (&str, &str) {
    let mut parts = mime.unwrap_or_default().split('/');
    match (parts.next(), parts.next()) {
        (Some(category), Some(subtype)) if !category.is_empty() && !subtype.is_empty() => {
            (category, subtype)
        }
        _ => (UNKNOWN_SEGMENT, UNKNOWN_SEGMENT),
    }
}

pub fn folder_structure(files: &[FileRecord]) -> Vec<CategoryFolder> {
    let mut tree: Vec<CategoryFolder> = Vec::new();
    for file in files {
        let (category, subtype) = split_mime(file.mime_type.as_deref());
        let idx = match tree.iter().position(|c| c.category == category) {
            Some(i) => i,
            None => {
                tree.push(CategoryFolder {
                    category: category.to_string(),
                    subtypes: Vec::new(),
                });
                tree.len() - 1
            }
        };
        let subtypes = &mut tree[idx].subtypes;
        match subtypes.iter_mut().find(|s| s.subtype == subtype) {
            Some(s) => s.files.push(file.name.clone()),
            None => subtypes.push(SubtypeFolder {
                subtype: subtype.to_string(),
                files: vec![file.name.clone()],
            }),
        }
    }
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Owner;

    fn file(name: &str, mime: Option<&str>, owner: Option<&str>) -> FileRecord {
        FileRecord {
            id: name.to_string(),
            name: name.to_string(),
            mime_type: mime.map(str::to_string),
            modified_time: "2024-01-01T00:00:00Z".to_string(),
            owners: owner
                .map(|o| {
                    vec![Owner {
                        display_name: o.to_string(),
                    }]
                })
                .unwrap_or_default(),
            ..Default::default()
        }
    }

    #[test]
    fn duplicates_are_case_insensitive() {
        let files = vec![
            file("Report.pdf", None, None),
            file("report.pdf", None, None),
            file("X.pdf", None, None),
        ];
        assert_eq!(analyze(&files).duplicates, vec!["report.pdf".to_string()]);
    }

    #[test]
    fn triple_name_yields_two_duplicates_and_whitespace_counts() {
        let files = vec![
            file("a.txt", None, None),
            file("A.TXT", None, None),
            file("a.txt ", None, None),
            file("a.txt", None, None),
        ];
        assert_eq!(duplicate_names(&files), vec!["a.txt", "a.txt"]);
    }

    #[test]
    fn sensitivity_matches_patterns_once_per_file() {
        let files = vec![
            file("Personal_Notes.txt", None, None),
            file("Team_Notes.txt", None, None),
            file("private secret passwords.txt", None, None),
        ];
        let names: Vec<&str> = analyze(&files)
            .sensitive_files
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["Personal_Notes.txt", "private secret passwords.txt"]);
    }

    #[test]
    fn configured_patterns_replace_the_defaults() {
        let files = vec![file("Payroll 2024.xlsx", None, None), file("personal.txt", None, None)];
        let summary = analyze_with(&files, &["PAYROLL".to_string()]);
        assert_eq!(summary.sensitive_files.len(), 1);
        assert_eq!(summary.sensitive_files[0].name, "Payroll 2024.xlsx");
    }

    #[test]
    fn access_map_keeps_first_seen_owner_order() {
        let files = vec![
            file("1", None, Some("Jane")),
            file("2", None, None),
            file("3", None, Some("Jane")),
            file("4", None, Some("")),
        ];
        let summary = analyze(&files);
        let owners: Vec<&str> = summary.access_map.iter().map(|o| o.owner.as_str()).collect();
        assert_eq!(owners, vec!["Jane", "Unknown"]);
        let jane = summary.owner("Jane").unwrap();
        assert_eq!(jane.owned.iter().map(|f| f.id.as_str()).collect::<Vec<_>>(), vec!["1", "3"]);
        assert!(jane.shared.is_empty());
        assert_eq!(summary.owner("Unknown").unwrap().owned.len(), 2);
    }

    #[test]
    fn folder_structure_groups_by_type_then_subtype() {
        let files = vec![
            file("b.png", Some("image/png"), None),
            file("a.pdf", Some("application/pdf"), None),
            file("c.png", Some("image/png"), None),
            file("d.jpg", Some("image/jpeg"), None),
        ];
        let summary = analyze(&files);
        let categories: Vec<&str> = summary
            .folder_structure
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(categories, vec!["image", "application"]);
        assert_eq!(summary.folder("image", "png").unwrap(), &["b.png", "c.png"]);
        assert_eq!(summary.folder("image", "jpeg").unwrap(), &["d.jpg"]);
    }

    #[test]
    fn missing_or_malformed_mime_lands_in_unknown() {
        let files = vec![
            file("logo.fig", None, None),
            file("blob", Some("garbage"), None),
            file("half", Some("text/"), None),
        ];
        let summary = analyze(&files);
        assert_eq!(summary.folder_structure.len(), 1);
        assert_eq!(
            summary.folder("unknown", "unknown").unwrap(),
            &["logo.fig", "blob", "half"]
        );
        assert_eq!(split_mime(Some("application/vnd.a/b")), ("application", "vnd.a"));
    }

    #[test]
    fn empty_collection_gives_empty_summary() {
        let summary = analyze(&[]);
        assert!(summary.duplicates.is_empty());
        assert!(summary.sensitive_files.is_empty());
        assert!(summary.access_map.is_empty());
        assert!(summary.folder_structure.is_empty());
    }

    #[test]
    fn analysis_is_repeatable() {
        let files = vec![file("x", Some("text/plain"), Some("A")), file("X", None, None)];
        assert_eq!(analyze(&files), analyze(&files));
    }
}
