use crate::config::{AppConfig, InsightConfig};
use crate::groups::{self, FileGroups, Group};
use crate::insights::{self, InsightSummary};
use crate::models::{merge_sources, FileRecord, TagSet};
use crate::{scoring, tags, views};
use anyhow::Context;
use chrono::{DateTime, Utc};
use providers::demo::DemoDriveProvider;
use providers::json::{read_figma_listing, JsonFileProvider};
use providers::noop::NoopProvider;
use providers::ProviderRegistry;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedFile<'a> {
    #[serde(flatten)]
    pub file: &'a FileRecord,
    pub suggested_tags: TagSet,
    pub importance: u8,
    pub group: Group,
    pub size_label: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    pub generated_at: DateTime<Utc>,
    pub files: Vec<AnnotatedFile<'a>>,
    pub groups: FileGroups<'a>,
    pub insights: InsightSummary<'a>,
    pub recent: Vec<&'a FileRecord>,
}

pub fn annotate(file: &FileRecord, now: DateTime<Utc>) -> AnnotatedFile<'_> {
    AnnotatedFile {
        file,
        suggested_tags: tags::tag_file(file),
        importance: scoring::score(file, now),
        group: groups::group_for(file, now),
        size_label: views::format_size(file.size_bytes()),
    }
}

/// Runs every heuristic once over `files`.
pub fn build_report<'a>(
    files: &'a [FileRecord],
    now: DateTime<Utc>,
    cfg: &InsightConfig,
) -> Report<'a> {
    info!("Annotating {} files...", files.len());
    let annotated: Vec<AnnotatedFile<'a>> = files
        .iter()
        .map(|f| {
            let a = annotate(f, now);
            debug!(id = %f.id, importance = a.importance, group = %a.group, "annotated");
            a
        })
        .collect();

    info!("Classifying into groups...");
    let groups = groups::classify(files, now);

    info!("Analyzing collection...");
    let insights = insights::analyze_with(files, &cfg.sensitive_patterns);
    if !insights.duplicates.is_empty() {
        info!("Found {} duplicate names.", insights.duplicates.len());
    }
    if !insights.sensitive_files.is_empty() {
        info!("Found {} potentially sensitive files.", insights.sensitive_files.len());
    }

    Report {
        generated_at: now,
        files: annotated,
        groups,
        insights,
        recent: views::recent_files(files, cfg.recent_limit),
    }
}

pub fn build_registry(config: &AppConfig, now: DateTime<Utc>) -> ProviderRegistry {
    let mut reg = ProviderRegistry::new()
        .with_source("noop", Arc::new(NoopProvider))
        .with_source("demo", Arc::new(DemoDriveProvider::new(now)));
    if let Some(path) = &config.provider.path {
        reg = reg.with_source("json", Arc::new(JsonFileProvider::new(path)));
    }
    reg.set_preferred(&config.provider.kind)
}

/// Pulls the configured listing, merges any Figma listing, newest first.
pub async fn collect_files(config: &AppConfig, registry: &ProviderRegistry) -> anyhow::Result<Vec<FileRecord>> {
    let source = registry
        .source(None)
        .with_context(|| format!("provider `{}`", config.provider.kind))?;
    let drive = source.list_files().await.context("list files")?;
    let figma = match &config.provider.figma_path {
        Some(path) => read_figma_listing(Path::new(path))
            .await
            .with_context(|| format!("read figma listing {path}"))?,
        None => Vec::new(),
    };
    info!("Loaded {} drive and {} figma files.", drive.len(), figma.len());
    Ok(merge_sources(drive, figma, config.provider.figma_owner.as_deref()))
}
