use insights_core::models::FileRecord;
use insights_core::naming::{format_name, NamingConvention, NamingPreferences};
use insights_core::store::{MetadataStore, PreferenceStore, StoreError};
use insights_core::tags::{add_tag, remove_tag, tag_file};
use chrono::NaiveDate;
use storage::SqliteStore;
use tempfile::tempdir;

fn record(id: &str, name: &str) -> FileRecord {
    FileRecord {
        id: id.to_string(),
        name: name.to_string(),
        mime_type: Some("application/vnd.google-apps.document".to_string()),
        modified_time: "2024-09-01T08:00:00Z".to_string(),
        size: Some("2048".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn tag_edits_and_renames_survive_resync() {
    let temp = tempdir().unwrap();
    let db = temp.path().join("nested").join("insights.db");
    let store = SqliteStore::open(&db.to_string_lossy()).await.unwrap();

    let file = record("doc1", "Meeting Agenda");
    store.sync_files(std::slice::from_ref(&file)).await.unwrap();

    let mut tags = tag_file(&file);
    assert!(add_tag(&mut tags, " q3 "));
    assert!(remove_tag(&mut tags, "document"));
    store.update_tags("doc1", &tags).await.unwrap();

    let prefs = NamingPreferences {
        convention: NamingConvention::KebabCase,
    };
    store.save_naming(&prefs).await.unwrap();
    let saved = store.load_naming().await.unwrap().unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
    let new_name = format_name(date, &file.name, "Q3 Planning", &saved);
    assert_eq!(new_name, "2024-09-01_meeting-agenda_q3-planning");
    store.update_name("doc1", &new_name).await.unwrap();

    // a provider refresh carries no tags and must not wipe the user's
    store.sync_files(&[record("doc1", &new_name)]).await.unwrap();
    let stored = store.tags("doc1").await.unwrap().unwrap();
    assert_eq!(stored.as_slice(), &["meeting", "q3"]);

    let row = store.get_file("doc1").await.unwrap().unwrap();
    assert_eq!(row.name, new_name);
    assert_eq!(row.size, 2048);
}

#[tokio::test]
async fn editing_unknown_file_reports_not_found() {
    let temp = tempdir().unwrap();
    let db = temp.path().join("insights.db");
    let store = SqliteStore::open(&db.to_string_lossy()).await.unwrap();

    let err = store
        .update_tags("ghost", &Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == "ghost"));
    assert!(store.tags("ghost").await.unwrap().is_none());
}
