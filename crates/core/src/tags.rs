use crate::models::{FileRecord, TagSet};
use crate::rules::{Field, TAG_RULES};

/// Union of every tag rule that fires for `name` / `mime`.
pub fn generate_tags(name: &str, mime: &str) -> TagSet {
    let name = name.to_lowercase();
    TAG_RULES
        .iter()
        .filter(|rule| match rule.field {
            Field::Name => name.contains(rule.pattern),
            Field::Mime => mime.contains(rule.pattern),
        })
        .map(|rule| rule.tag)
        .collect()
}

/// Existing tags first, then any generated ones not already present.
pub fn tag_file(file: &FileRecord) -> TagSet {
    let mut tags = file.tags.clone();
    for tag in generate_tags(&file.name, file.mime_or_unknown()).iter() {
        tags.insert(tag);
    }
    tags
}

/// Trims `candidate`; blank input is ignored. Returns whether the set changed.
pub fn add_tag(tags: &mut TagSet, candidate: &str) -> bool {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return false;
    }
    tags.insert(candidate)
}

pub fn remove_tag(tags: &mut TagSet, tag: &str) -> bool {
    tags.remove(tag)
}
