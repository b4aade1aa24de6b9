//! Notification inbox repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/insert APIs and the unread -> read state transitions
//!   over the `member_notifications` table.
//!
//! # Invariants
//! - Ownership and unread checks live inside the conditional UPDATE
//!   predicate itself; there is no separate check-then-act window.
//! - `read_at` is assigned exactly once, on the unread -> read
//!   transition; re-marking an already-read row matches zero rows.

use crate::model::notification::{Notification, NotificationKind};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const NOTIFICATION_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    type,
    title,
    message,
    is_read,
    created_at,
    read_at
FROM member_notifications";

/// Repository interface for the per-member notification inbox.
pub trait NotificationRepository {
    /// Creates one unread notification and returns its store-assigned id.
    /// Creation is a collaborator/seeding surface, not a dashboard
    /// mutation.
    fn insert(
        &self,
        user_id: i64,
        kind: NotificationKind,
        title: &str,
        message: &str,
    ) -> RepoResult<i64>;

    /// Lists notifications newest-first, optionally unread only.
    fn list(&self, user_id: i64, unread_only: bool) -> RepoResult<Vec<Notification>>;

    /// Transitions one owned, unread notification to read and returns the
    /// updated row. `None` covers a missing id, a foreign owner and an
    /// already-read row alike.
    fn mark_read(&self, notification_id: i64, user_id: i64) -> RepoResult<Option<Notification>>;

    /// Transitions every unread notification owned by the user to read
    /// and returns how many rows actually changed.
    fn mark_all_read(&self, user_id: i64) -> RepoResult<u64>;

    /// Counts unread notifications for the user.
    fn count_unread(&self, user_id: i64) -> RepoResult<u64>;
}

/// SQLite-backed notification inbox repository.
pub struct SqliteNotificationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNotificationRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            "member_notifications",
            &[
                "id", "user_id", "type", "title", "message", "is_read", "created_at", "read_at",
            ],
        )?;
        Ok(Self { conn })
    }

    fn get_by_id(&self, notification_id: i64) -> RepoResult<Option<Notification>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTIFICATION_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([notification_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_notification_row(row)?));
        }
        Ok(None)
    }
}

impl NotificationRepository for SqliteNotificationRepository<'_> {
    fn insert(
        &self,
        user_id: i64,
        kind: NotificationKind,
        title: &str,
        message: &str,
    ) -> RepoResult<i64> {
        self.conn.execute(
            "INSERT INTO member_notifications (user_id, type, title, message)
             VALUES (?1, ?2, ?3, ?4);",
            params![user_id, kind.as_str(), title, message],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list(&self, user_id: i64, unread_only: bool) -> RepoResult<Vec<Notification>> {
        let mut sql = format!("{NOTIFICATION_SELECT_SQL} WHERE user_id = ?1");
        if unread_only {
            sql.push_str(" AND is_read = 0");
        }
        sql.push_str(" ORDER BY created_at DESC, id DESC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([user_id])?;
        let mut notifications = Vec::new();
        while let Some(row) = rows.next()? {
            notifications.push(parse_notification_row(row)?);
        }

        Ok(notifications)
    }

    fn mark_read(&self, notification_id: i64, user_id: i64) -> RepoResult<Option<Notification>> {
        let changed = self.conn.execute(
            "UPDATE member_notifications
             SET
                is_read = 1,
                read_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1
               AND user_id = ?2
               AND is_read = 0;",
            params![notification_id, user_id],
        )?;

        if changed == 0 {
            return Ok(None);
        }

        self.get_by_id(notification_id)
    }

    fn mark_all_read(&self, user_id: i64) -> RepoResult<u64> {
        let changed = self.conn.execute(
            "UPDATE member_notifications
             SET
                is_read = 1,
                read_at = (strftime('%s', 'now') * 1000)
             WHERE user_id = ?1
               AND is_read = 0;",
            [user_id],
        )?;

        Ok(changed as u64)
    }

    fn count_unread(&self, user_id: i64) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM member_notifications WHERE user_id = ?1 AND is_read = 0;",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}

fn parse_notification_row(row: &Row<'_>) -> RepoResult<Notification> {
    let kind_text: String = row.get("type")?;
    let kind = NotificationKind::parse(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid notification type `{kind_text}` in member_notifications.type"
        ))
    })?;

    let is_read = match row.get::<_, i64>("is_read")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_read value `{other}` in member_notifications.is_read"
            )));
        }
    };

    let read_at: Option<i64> = row.get("read_at")?;
    if is_read != read_at.is_some() {
        return Err(RepoError::InvalidData(format!(
            "is_read/read_at mismatch on notification {}",
            row.get::<_, i64>("id")?
        )));
    }

    Ok(Notification {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        kind,
        title: row.get("title")?,
        message: row.get("message")?,
        is_read,
        created_at: row.get("created_at")?,
        read_at,
    })
}
