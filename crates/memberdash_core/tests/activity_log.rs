use memberdash_core::db::migrations::latest_version;
use memberdash_core::db::open_db_in_memory;
use memberdash_core::{ActivityRepository, RepoError, SqliteActivityRepository};
use rusqlite::Connection;
use serde_json::json;

const USER: i64 = 3;

#[test]
fn append_then_list_returns_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteActivityRepository::try_new(&conn).unwrap();

    let first = repo.append(USER, "login", "Logged in", None).unwrap();
    let second = repo.append(USER, "profile", "Bio updated", None).unwrap();
    let third = repo.append(USER, "settings", "Theme changed", None).unwrap();
    assert!(first < second && second < third);

    let entries = repo.list(USER, 10).unwrap();
    let ids: Vec<i64> = entries.iter().map(|entry| entry.id).collect();
    assert_eq!(ids, vec![third, second, first]);
    assert_eq!(entries[0].kind, "settings");
    assert_eq!(entries[2].description, "Logged in");
}

#[test]
fn list_limit_returns_only_the_most_recent_entries() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteActivityRepository::try_new(&conn).unwrap();

    for index in 0..5 {
        repo.append(USER, "login", &format!("login {index}"), None)
            .unwrap();
    }

    let page = repo.list(USER, 2).unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].description, "login 4");
    assert_eq!(page[1].description, "login 3");
}

#[test]
fn meta_payload_is_serialized_to_json_text() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteActivityRepository::try_new(&conn).unwrap();

    let meta = json!({ "ip": "192.168.1.1", "attempts": 2 });
    repo.append(USER, "login", "Logged in", Some(&meta)).unwrap();
    repo.append(USER, "login", "Logged in again", None).unwrap();

    let entries = repo.list(USER, 10).unwrap();
    assert!(entries[0].meta.is_none());

    let stored = entries[1].meta.as_deref().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(stored).unwrap();
    assert_eq!(parsed["ip"], "192.168.1.1");
    assert_eq!(parsed["attempts"], 2);
}

#[test]
fn count_and_list_are_scoped_per_user() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteActivityRepository::try_new(&conn).unwrap();

    repo.append(1, "login", "user one", None).unwrap();
    repo.append(1, "login", "user one again", None).unwrap();
    repo.append(2, "login", "user two", None).unwrap();

    assert_eq!(repo.count(1).unwrap(), 2);
    assert_eq!(repo.count(2).unwrap(), 1);
    assert_eq!(repo.count(99).unwrap(), 0);
    assert!(repo.list(99, 10).unwrap().is_empty());
}

#[test]
fn repository_rejects_connection_without_activity_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteActivityRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("member_activity"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE member_activity (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            type TEXT NOT NULL,
            description TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteActivityRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "member_activity",
            column: "meta"
        })
    ));
}
