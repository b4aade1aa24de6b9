//! Activity log repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide append/list/count APIs over the `member_activity` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - The log is append-only: no update or delete API exists.
//! - Listing is newest-first by `created_at`, ties broken by descending
//!   `id` so ordering stays deterministic within one millisecond.

use crate::model::activity::ActivityEntry;
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const ACTIVITY_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    type,
    description,
    meta,
    created_at
FROM member_activity";

/// Default page size for activity listing.
pub const ACTIVITY_DEFAULT_LIMIT: u32 = 10;

const ACTIVITY_LIMIT_MAX: u32 = 100;

/// Repository interface for the append-only activity log.
pub trait ActivityRepository {
    /// Appends one immutable entry and returns its store-assigned id.
    /// `meta`, when present, is serialized to JSON text.
    fn append(
        &self,
        user_id: i64,
        kind: &str,
        description: &str,
        meta: Option<&serde_json::Value>,
    ) -> RepoResult<i64>;

    /// Returns at most `limit` entries for the user, newest first.
    fn list(&self, user_id: i64, limit: u32) -> RepoResult<Vec<ActivityEntry>>;

    /// Counts all entries for the user.
    fn count(&self, user_id: i64) -> RepoResult<u64>;
}

/// SQLite-backed activity log repository.
pub struct SqliteActivityRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteActivityRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            "member_activity",
            &["id", "user_id", "type", "description", "meta", "created_at"],
        )?;
        Ok(Self { conn })
    }
}

impl ActivityRepository for SqliteActivityRepository<'_> {
    fn append(
        &self,
        user_id: i64,
        kind: &str,
        description: &str,
        meta: Option<&serde_json::Value>,
    ) -> RepoResult<i64> {
        let meta_text = meta
            .map(serde_json::to_string)
            .transpose()
            .map_err(|err| RepoError::InvalidData(format!("unserializable activity meta: {err}")))?;

        self.conn.execute(
            "INSERT INTO member_activity (user_id, type, description, meta)
             VALUES (?1, ?2, ?3, ?4);",
            params![user_id, kind, description, meta_text.as_deref()],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list(&self, user_id: i64, limit: u32) -> RepoResult<Vec<ActivityEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ACTIVITY_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY created_at DESC, id DESC
             LIMIT ?2;"
        ))?;

        let mut rows = stmt.query(params![user_id, normalize_activity_limit(Some(limit))])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_activity_row(row)?);
        }

        Ok(entries)
    }

    fn count(&self, user_id: i64) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM member_activity WHERE user_id = ?1;",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}

/// Normalizes the list limit: absent or zero falls back to the default,
/// oversized values clamp to 100.
pub fn normalize_activity_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) | None => ACTIVITY_DEFAULT_LIMIT,
        Some(value) if value > ACTIVITY_LIMIT_MAX => ACTIVITY_LIMIT_MAX,
        Some(value) => value,
    }
}

fn parse_activity_row(row: &Row<'_>) -> RepoResult<ActivityEntry> {
    Ok(ActivityEntry {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        kind: row.get("type")?,
        description: row.get("description")?,
        meta: row.get("meta")?,
        created_at: row.get("created_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::normalize_activity_limit;

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(normalize_activity_limit(None), 10);
        assert_eq!(normalize_activity_limit(Some(0)), 10);
        assert_eq!(normalize_activity_limit(Some(25)), 25);
        assert_eq!(normalize_activity_limit(Some(5000)), 100);
    }
}
