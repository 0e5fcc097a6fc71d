//! Storage layer: SQLite schema and helpers for user-edited file metadata.
//!
//! Holds DB pool setup, the schema runner and the tag/name/preference queries.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, warn};

const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS files (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        mime_type TEXT,
        size INTEGER NOT NULL DEFAULT 0,
        modified_time TEXT,
        tags_json TEXT NOT NULL DEFAULT '[]',
        last_synced TEXT
    )"#,
    r#"CREATE TABLE IF NOT EXISTS preferences (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )"#,
];

pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let mut url = database_url.to_string();
    if !database_url.starts_with("sqlite:") {
        let path = std::path::PathBuf::from(database_url);
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let norm = path.to_string_lossy().replace('\\', "/");
        if path.is_absolute() {
            url = format!("sqlite:///{}?mode=rwc", norm.trim_start_matches('/'));
        } else {
            url = format!("sqlite://{}?mode=rwc", norm);
        }
    }
    let mut opts = SqlitePoolOptions::new();
    if url.contains("memory") {
        opts = opts.max_connections(1);
    } else {
        opts = opts.max_connections(5);
    }
    let pool = opts.connect(&url).await?;
    Ok(pool)
}

/// Creates the tables if missing. Safe to run multiple times.
pub async fn migrate(pool: &SqlitePool) -> anyhow::Result<()> {
    for stmt in SCHEMA {
        sqlx::query(*stmt).execute(pool).await?;
    }
    Ok(())
}

/// A file row as persisted. Tags are kept as a JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StoredFile {
    pub id: String,
    pub name: String,
    pub mime_type: Option<String>,
    pub size: i64,
    pub modified_time: Option<String>,
    pub tags_json: String,
    pub last_synced: Option<String>,
}

impl StoredFile {
    /// Unreadable tag columns are logged and read as empty.
    pub fn tags(&self) -> Vec<String> {
        match serde_json::from_str(&self.tags_json) {
            Ok(tags) => tags,
            Err(err) => {
                warn!(id = %self.id, %err, "ignoring unreadable stored tags");
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connects and migrates in one step.
    pub async fn open(database_url: &str) -> anyhow::Result<Self> {
        let pool = connect(database_url).await?;
        migrate(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Inserts or refreshes a file row. An empty `tags` leaves stored tags untouched.
    pub async fn upsert_file(&self, file: &StoredFile) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO files (id, name, mime_type, size, modified_time, tags_json, last_synced)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
               name=excluded.name,
               mime_type=excluded.mime_type,
               size=excluded.size,
               modified_time=excluded.modified_time,
               tags_json=CASE WHEN excluded.tags_json = '[]' THEN files.tags_json ELSE excluded.tags_json END,
               last_synced=excluded.last_synced",
        )
        .bind(&file.id)
        .bind(&file.name)
        .bind(&file.mime_type)
        .bind(file.size)
        .bind(&file.modified_time)
        .bind(&file.tags_json)
        .bind(&file.last_synced)
        .execute(&self.pool)
        .await?;
        debug!(id = %file.id, "upserted file metadata");
        Ok(())
    }

    /// Returns false when no row matched `id`.
    pub async fn write_tags(&self, id: &str, tags: &[String]) -> anyhow::Result<bool> {
        let tags_json = serde_json::to_string(tags)?;
        let res = sqlx::query("UPDATE files SET tags_json = ? WHERE id = ?")
            .bind(tags_json)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    /// Returns false when no row matched `id`.
    pub async fn write_name(&self, id: &str, name: &str) -> anyhow::Result<bool> {
        let res = sqlx::query("UPDATE files SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn get_file(&self, id: &str) -> anyhow::Result<Option<StoredFile>> {
        let row = sqlx::query_as::<_, StoredFile>("SELECT * FROM files WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn load_tags(&self, id: &str) -> anyhow::Result<Option<Vec<String>>> {
        Ok(self.get_file(id).await?.map(|f| f.tags()))
    }

    pub async fn get_preference(&self, key: &str) -> anyhow::Result<Option<String>> {
        let value: Option<(String,)> = sqlx::query_as("SELECT value FROM preferences WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value.map(|(v,)| v))
    }

    pub async fn set_preference(&self, key: &str, value: &str) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO preferences (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, tags: &[&str]) -> StoredFile {
        StoredFile {
            id: id.to_string(),
            name: format!("{id}.pdf"),
            mime_type: Some("application/pdf".to_string()),
            size: 10,
            modified_time: Some("2024-01-01T00:00:00Z".to_string()),
            tags_json: serde_json::to_string(tags).unwrap(),
            last_synced: None,
        }
    }

    async fn store() -> (tempfile::TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.db");
        let store = SqliteStore::open(&path.to_string_lossy()).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn resync_without_tags_keeps_user_tags() {
        let (_dir, store) = store().await;
        store.upsert_file(&row("a", &["keep"])).await.unwrap();
        store.upsert_file(&row("a", &[])).await.unwrap();
        assert_eq!(store.load_tags("a").await.unwrap(), Some(vec!["keep".to_string()]));
    }

    #[tokio::test]
    async fn updates_report_missing_rows() {
        let (_dir, store) = store().await;
        assert!(!store.write_name("ghost", "x").await.unwrap());
        store.upsert_file(&row("a", &[])).await.unwrap();
        assert!(store.write_name("a", "Renamed.pdf").await.unwrap());
        assert!(store.write_tags("a", &["t".to_string()]).await.unwrap());
        let file = store.get_file("a").await.unwrap().unwrap();
        assert_eq!(file.name, "Renamed.pdf");
        assert_eq!(file.tags(), vec!["t".to_string()]);
    }

    #[test]
    fn corrupted_tag_column_reads_as_empty() {
        let mut file = row("a", &[]);
        file.tags_json = "[\"unterminated".to_string();
        assert!(file.tags().is_empty());
    }

    #[tokio::test]
    async fn preferences_round_trip_and_overwrite() {
        let (_dir, store) = store().await;
        assert_eq!(store.get_preference("naming").await.unwrap(), None);
        store.set_preference("naming", "snake_case").await.unwrap();
        store.set_preference("naming", "kebab-case").await.unwrap();
        assert_eq!(
            store.get_preference("naming").await.unwrap().as_deref(),
            Some("kebab-case")
        );
    }
}
