use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use cli::{inputs, render};
use insights_core::config::{self, AppConfig};
use insights_core::models::FileRecord;
use insights_core::naming::{self, NamingConvention, NamingPreferences};
use insights_core::store::{MetadataStore, PreferenceStore, StoreError};
use insights_core::views::{self, ViewFilter};
use insights_core::{groups, insights, pipeline, tags};
use std::path::PathBuf;
use storage::SqliteStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;
    let now = inputs::resolve_now(cli.now.as_deref())?;
    let input = cli.input.clone();

    match cli.command {
        Commands::Tags { name, mime } => {
            let generated = tags::generate_tags(&name, mime.as_deref().unwrap_or_default());
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&generated)?);
            } else {
                println!("{}", render::tags(&generated));
            }
            Ok(())
        }
        Commands::Score => {
            let files = inputs::load_files(&cfg, input.as_deref(), now).await?;
            run_score(&files, now, cli.json)
        }
        Commands::Groups => {
            let files = inputs::load_files(&cfg, input.as_deref(), now).await?;
            let grouped = groups::classify(&files, now);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&grouped)?);
            } else {
                print!("{}", render::groups(&grouped));
            }
            Ok(())
        }
        Commands::Insights => {
            let files = inputs::load_files(&cfg, input.as_deref(), now).await?;
            let summary = insights::analyze_with(&files, &cfg.insights.sensitive_patterns);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", render::insights(&summary));
            }
            Ok(())
        }
        Commands::Report => {
            let files = inputs::load_files(&cfg, input.as_deref(), now).await?;
            let report = pipeline::build_report(&files, now, &cfg.insights);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::report(&report));
            }
            Ok(())
        }
        Commands::List { view, limit } => {
            let files = inputs::load_files(&cfg, input.as_deref(), now).await?;
            let filter = match view {
                Some(v) => v.parse::<ViewFilter>()?,
                None => cfg.view.filter,
            };
            let listed = views::recent_view(&files, limit.unwrap_or(cfg.view.limit), filter);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&listed)?);
            } else {
                print!("{}", render::file_list(&listed));
            }
            Ok(())
        }
        Commands::Rename {
            title,
            project,
            date,
            convention,
            id,
        } => run_rename(&cfg, now, title, project, date, convention, id, cli.json).await,
        Commands::Prefs { set } => run_prefs(&cfg, set, cli.json).await,
        Commands::Tag { action } => run_tag(&cfg, action, cli.json).await,
        Commands::Sync => {
            let files = inputs::load_files(&cfg, input.as_deref(), now).await?;
            let store = open_store(&cfg).await?;
            store.sync_files(&files).await?;
            info!("Synced {} files to {}.", files.len(), cfg.database.path);
            if cli.json {
                println!("{}", serde_json::json!({ "status": "ok", "synced": files.len() }));
            } else {
                println!("synced {} files", files.len());
            }
            Ok(())
        }
    }
}

#[derive(Parser)]
#[command(name = "file-insights")]
#[command(about = "Tags, ranks and summarizes file metadata", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Read files from a JSON listing instead of the configured provider
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Reference instant for recency (RFC 3339); defaults to now
    #[arg(long, global = true)]
    now: Option<String>,

    /// Output JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest tags for a single name and media type
    Tags {
        name: String,
        #[arg(long)]
        mime: Option<String>,
    },
    /// Importance score per file
    Score,
    /// Group files into fixed buckets
    Groups,
    /// Duplicates, sensitive files, access and folder suggestions
    Insights,
    /// Everything above in one pass
    Report,
    /// Most recently modified files, optionally filtered
    List {
        /// all|folders|files|images|documents|others
        #[arg(long)]
        view: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Build a name following the naming convention
    Rename {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        project: String,
        /// YYYY-MM-DD; defaults to the date of --now
        #[arg(long)]
        date: Option<String>,
        /// Override the saved convention
        #[arg(long)]
        convention: Option<String>,
        /// Store the new name on this file id
        #[arg(long)]
        id: Option<String>,
    },
    /// Show or save the naming convention
    Prefs {
        #[arg(long)]
        set: Option<String>,
    },
    /// Edit stored tags
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },
    /// Upsert the collection into the metadata store
    Sync,
}

#[derive(Subcommand)]
enum TagAction {
    Add { id: String, tag: String },
    Remove { id: String, tag: String },
}

async fn open_store(cfg: &AppConfig) -> Result<SqliteStore> {
    SqliteStore::open(&cfg.database.path)
        .await
        .with_context(|| format!("open metadata store {}", cfg.database.path))
}

fn run_score(files: &[FileRecord], now: DateTime<Utc>, json: bool) -> Result<()> {
    if json {
        let rows: Vec<_> = files
            .iter()
            .map(|f| {
                serde_json::json!({
                    "id": f.id,
                    "name": f.name,
                    "importance": insights_core::scoring::score(f, now),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", render::scores(files, now));
    }
    Ok(())
}

async fn current_naming(cfg: &AppConfig, store: &SqliteStore) -> Result<NamingPreferences> {
    Ok(store.load_naming().await?.unwrap_or(cfg.naming))
}

#[allow(clippy::too_many_arguments)]
async fn run_rename(
    cfg: &AppConfig,
    now: DateTime<Utc>,
    title: String,
    project: String,
    date: Option<String>,
    convention: Option<String>,
    id: Option<String>,
    json: bool,
) -> Result<()> {
    let store = open_store(cfg).await?;
    let prefs = match convention {
        Some(c) => NamingPreferences {
            convention: c.parse::<NamingConvention>()?,
        },
        None => current_naming(cfg, &store).await?,
    };
    let date = match date {
        Some(d) => NaiveDate::parse_from_str(&d, "%Y-%m-%d")
            .with_context(|| format!("invalid --date {d:?}"))?,
        None => now.date_naive(),
    };
    let name = naming::format_name(date, &title, &project, &prefs);
    if let Some(id) = &id {
        store.update_name(id, &name).await?;
        info!(%id, %name, "renamed");
    }
    if json {
        println!(
            "{}",
            serde_json::json!({ "name": name, "convention": prefs.convention, "id": id })
        );
    } else {
        println!("{name}");
    }
    Ok(())
}

async fn run_prefs(cfg: &AppConfig, set: Option<String>, json: bool) -> Result<()> {
    let store = open_store(cfg).await?;
    let prefs = match set {
        Some(raw) => {
            let prefs = NamingPreferences {
                convention: raw.parse::<NamingConvention>()?,
            };
            store.save_naming(&prefs).await?;
            prefs
        }
        None => current_naming(cfg, &store).await?,
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&prefs)?);
    } else {
        println!("naming convention: {}", prefs.convention);
    }
    Ok(())
}

async fn run_tag(cfg: &AppConfig, action: TagAction, json: bool) -> Result<()> {
    let (id, tag, adding) = match action {
        TagAction::Add { id, tag } => (id, tag, true),
        TagAction::Remove { id, tag } => (id, tag, false),
    };
    if adding && tag.trim().is_empty() {
        bail!("tag must not be blank");
    }
    let store = open_store(cfg).await?;
    let mut current = store
        .tags(&id)
        .await?
        .ok_or_else(|| StoreError::NotFound(id.clone()))?;
    let changed = if adding {
        tags::add_tag(&mut current, &tag)
    } else {
        tags::remove_tag(&mut current, &tag)
    };
    if changed {
        store.update_tags(&id, &current).await?;
    }
    if json {
        println!(
            "{}",
            serde_json::json!({ "id": id, "changed": changed, "tags": current })
        );
    } else {
        println!("{}: {}", id, render::tags(&current));
    }
    Ok(())
}
