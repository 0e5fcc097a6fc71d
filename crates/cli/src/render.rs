//! Plain-text renderings of engine output for terminal use.

use chrono::{DateTime, Utc};
use insights_core::groups::FileGroups;
use insights_core::insights::InsightSummary;
use insights_core::models::{FileRecord, TagSet};
use insights_core::pipeline::Report;
use insights_core::scoring;
use insights_core::views::format_size;
use std::fmt::Write;

pub fn tags(tags: &TagSet) -> String {
    if tags.is_empty() {
        return "(no tags)".to_string();
    }
    tags.iter().collect::<Vec<_>>().join(", ")
}

pub fn scores(files: &[FileRecord], now: DateTime<Utc>) -> String {
    let mut out = String::new();
    for file in files {
        let _ = writeln!(out, "{}  {}", scoring::score(file, now), file.name);
    }
    out
}

pub fn file_list(files: &[&FileRecord]) -> String {
    let mut out = String::new();
    for file in files {
        let _ = write!(
            out,
            "{}\t{}\t{}\t{}",
            file.name,
            format_size(file.size_bytes()),
            file.modified_time,
            file.owner_name()
        );
        if !file.tags.is_empty() {
            let _ = write!(out, "\t[{}]", tags(&file.tags));
        }
        out.push('\n');
    }
    out
}

pub fn groups(groups: &FileGroups<'_>) -> String {
    let mut out = String::new();
    for (group, files) in groups.iter() {
        let _ = writeln!(out, "{} ({})", group, files.len());
        for file in files {
            let _ = writeln!(out, "  {}", file.name);
        }
    }
    out
}

/// `image` -> `Images`, as folder headings read in the overview.
fn category_heading(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => format!("{}{}s", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

pub fn insights(summary: &InsightSummary<'_>) -> String {
    let mut out = String::new();

    out.push_str("Duplicate names\n");
    if summary.duplicates.is_empty() {
        out.push_str("  No duplicate file names found\n");
    }
    for name in &summary.duplicates {
        let _ = writeln!(out, "  {name}");
    }

    out.push_str("Sensitive files\n");
    match summary.sensitive_files.len() {
        0 => out.push_str("  No sensitive files detected\n"),
        1 => out.push_str("  Found 1 potentially sensitive file\n"),
        n => {
            let _ = writeln!(out, "  Found {n} potentially sensitive files");
        }
    }
    for file in &summary.sensitive_files {
        let _ = writeln!(out, "  {}", file.name);
    }

    out.push_str("Access\n");
    for entry in &summary.access_map {
        let _ = writeln!(
            out,
            "  {}: {} owned, {} shared",
            entry.owner,
            entry.owned.len(),
            entry.shared.len()
        );
    }

    out.push_str("Suggested folders\n");
    for category in &summary.folder_structure {
        let _ = writeln!(
            out,
            "  {} ({} types)",
            category_heading(&category.category),
            category.subtypes.len()
        );
        for subtype in &category.subtypes {
            let _ = writeln!(out, "    {} ({})", subtype.subtype, subtype.files.len());
            for name in &subtype.files {
                let _ = writeln!(out, "      {name}");
            }
        }
    }
    out
}

pub fn report(report: &Report<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Generated at {}", report.generated_at.to_rfc3339());
    out.push_str("Recently modified\n");
    for file in &report.recent {
        let _ = writeln!(out, "  {}", file.name);
    }
    out.push_str("Files\n");
    for a in &report.files {
        let _ = writeln!(
            out,
            "  {}  {}  {}  {}  [{}]",
            a.importance,
            a.file.name,
            a.size_label,
            a.group,
            tags(&a.suggested_tags)
        );
    }
    out.push_str(&groups(&report.groups));
    out.push_str(&insights(&report.insights));
    out
}
