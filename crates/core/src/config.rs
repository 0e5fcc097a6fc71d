use crate::naming::NamingPreferences;
use crate::rules::default_sensitive_patterns;
use crate::views::{ViewFilter, DEFAULT_LIST_LIMIT, DEFAULT_OVERVIEW_LIMIT};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "FILE_INSIGHTS";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub database: DatabaseConfig,
    pub insights: InsightConfig,
    pub view: ViewConfig,
    pub naming: NamingPreferences,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// `demo` or `json`.
    pub kind: String,
    /// Drive-shaped listing for the `json` provider.
    pub path: Option<String>,
    /// Optional Figma-shaped listing merged into the collection.
    pub figma_path: Option<String>,
    pub figma_owner: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: "demo".to_string(),
            path: None,
            figma_path: None,
            figma_owner: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "data/insights.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    pub sensitive_patterns: Vec<String>,
    pub recent_limit: usize,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            sensitive_patterns: default_sensitive_patterns(),
            recent_limit: DEFAULT_OVERVIEW_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub limit: usize,
    pub filter: ViewFilter,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIST_LIMIT,
            filter: ViewFilter::All,
        }
    }
}

pub fn load(path: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut settings = config::Config::builder();
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/default").required(false));
    }
    settings = settings.add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));
    let cfg = settings.build()?;
    Ok(cfg.try_deserialize()?)
}
