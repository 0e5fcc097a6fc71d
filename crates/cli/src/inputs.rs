use anyhow::Context;
use chrono::{DateTime, Utc};
use insights_core::config::AppConfig;
use insights_core::models::FileRecord;
use insights_core::pipeline;
use std::path::Path;

/// `--now` if given (RFC 3339), otherwise the current instant.
pub fn resolve_now(raw: Option<&str>) -> anyhow::Result<DateTime<Utc>> {
    match raw {
        Some(s) => Ok(DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("invalid --now value {s:?}"))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

/// Loads the collection from the configured provider; `input` swaps in a JSON listing.
pub async fn load_files(
    cfg: &AppConfig,
    input: Option<&Path>,
    now: DateTime<Utc>,
) -> anyhow::Result<Vec<FileRecord>> {
    let mut cfg = cfg.clone();
    if let Some(path) = input {
        cfg.provider.kind = "json".to_string();
        cfg.provider.path = Some(path.to_string_lossy().into_owned());
    }
    let registry = pipeline::build_registry(&cfg, now);
    pipeline::collect_files(&cfg, &registry).await
}
