use crate::models::FileRecord;
use crate::rules::{name_matches_any, GROUP_RULES, IMPORTANT_THRESHOLD};
use crate::scoring::score;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Group {
    #[serde(rename = "Recent Projects")]
    RecentProjects,
    #[serde(rename = "Financial Documents")]
    FinancialDocuments,
    #[serde(rename = "Meeting Materials")]
    MeetingMaterials,
    #[serde(rename = "Important Documents")]
    ImportantDocuments,
    #[serde(rename = "Other")]
    Other,
}

impl Group {
    pub const ALL: [Group; 5] = [
        Group::RecentProjects,
        Group::FinancialDocuments,
        Group::MeetingMaterials,
        Group::ImportantDocuments,
        Group::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Group::RecentProjects => "Recent Projects",
            Group::FinancialDocuments => "Financial Documents",
            Group::MeetingMaterials => "Meeting Materials",
            Group::ImportantDocuments => "Important Documents",
            Group::Other => "Other",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// All five buckets, always present, each in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FileGroups<'a> {
    buckets: BTreeMap<Group, Vec<&'a FileRecord>>,
}

impl<'a> FileGroups<'a> {
    pub fn new() -> Self {
        Self {
            buckets: Group::ALL.iter().map(|g| (*g, Vec::new())).collect(),
        }
    }

    pub fn get(&self, group: Group) -> &[&'a FileRecord] {
        self.buckets.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Group, &[&'a FileRecord])> {
        self.buckets.iter().map(|(g, files)| (*g, files.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    fn push(&mut self, group: Group, file: &'a FileRecord) {
        self.buckets.entry(group).or_default().push(file);
    }
}

impl Default for FileGroups<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// First matching rule wins: importance, then the keyword buckets, then `Other`.
pub fn group_for(file: &FileRecord, now: DateTime<Utc>) -> Group {
    if score(file, now) >= IMPORTANT_THRESHOLD {
        return Group::ImportantDocuments;
    }
    let name = file.lower_name();
    GROUP_RULES
        .iter()
        .find(|(_, patterns)| name_matches_any(&name, *patterns))
        .map(|(group, _)| *group)
        .unwrap_or(Group::Other)
}

pub fn classify<'a>(files: &'a [FileRecord], now: DateTime<Utc>) -> FileGroups<'a> {
    let mut groups = FileGroups::new();
    for file in files {
        groups.push(group_for(file, now), file);
    }
    groups
}
