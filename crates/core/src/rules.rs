//! Keyword tables driving the tag, importance, grouping and sensitivity heuristics.
//!
//! Name patterns are matched case-insensitively against the file name; mime
//! patterns are plain substring tests on the media type.

use crate::groups::Group;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Mime,
}

#[derive(Debug, Clone, Copy)]
pub struct TagRule {
    pub field: Field,
    pub pattern: &'static str,
    pub tag: &'static str,
}

pub const TAG_RULES: &[TagRule] = &[
    TagRule { field: Field::Mime, pattern: "document", tag: "document" },
    TagRule { field: Field::Mime, pattern: "spreadsheet", tag: "spreadsheet" },
    TagRule { field: Field::Mime, pattern: "presentation", tag: "presentation" },
    TagRule { field: Field::Mime, pattern: "image", tag: "image" },
    TagRule { field: Field::Mime, pattern: "pdf", tag: "pdf" },
    TagRule { field: Field::Name, pattern: "project", tag: "project" },
    TagRule { field: Field::Name, pattern: "proposal", tag: "proposal" },
    TagRule { field: Field::Name, pattern: "report", tag: "report" },
    TagRule { field: Field::Name, pattern: "budget", tag: "financial" },
    TagRule { field: Field::Name, pattern: "invoice", tag: "financial" },
    TagRule { field: Field::Name, pattern: "meeting", tag: "meeting" },
    TagRule { field: Field::Name, pattern: "notes", tag: "notes" },
];

/// `(max_days_exclusive, points)`, checked in order; first band that fits wins.
pub const RECENCY_BANDS: &[(f64, i32)] = &[(7.0, 3), (30.0, 2)];

/// Every matching row adds its points.
pub const MIME_WEIGHTS: &[(&str, i32)] = &[("document", 2), ("spreadsheet", 2), ("presentation", 2)];

pub const NAME_WEIGHTS: &[(&str, i32)] = &[("important", 3), ("urgent", 3), ("final", 2), ("draft", -1)];

pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 5;
pub const IMPORTANT_THRESHOLD: u8 = 4;

/// Keyword buckets, in priority order, consulted after the importance threshold.
pub const GROUP_RULES: &[(Group, &[&str])] = &[
    (Group::RecentProjects, &["project", "proposal"]),
    (Group::FinancialDocuments, &["budget", "invoice"]),
    (Group::MeetingMaterials, &["meeting", "notes"]),
];

pub const SENSITIVE_PATTERNS: &[&str] = &["password", "secret", "private", "confidential", "personal"];

/// `lower_name` must already be lower-cased.
pub fn name_matches_any<S: AsRef<str>>(lower_name: &str, patterns: &[S]) -> bool {
    patterns
        .iter()
        .any(|p| lower_name.contains(&p.as_ref().to_lowercase()))
}

pub fn default_sensitive_patterns() -> Vec<String> {
    SENSITIVE_PATTERNS.iter().map(|p| p.to_string()).collect()
}
