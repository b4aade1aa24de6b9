//! Dashboard composition root.
//!
//! # Responsibility
//! - Wire the SQLite-backed repositories and use-case services over one
//!   migrated connection, constructed once at process start.
//! - Expose the full public operation surface a GraphQL layer (or any
//!   front end) binds to.
//!
//! # Invariants
//! - There is no hidden global: callers construct and own the root and
//!   pass it to whatever registers the transport surface.

use crate::model::activity::ActivityEntry;
use crate::model::attributes::{MemberProfile, MemberSettings};
use crate::model::notification::Notification;
use crate::model::stats::StatsSnapshot;
use crate::orders::OrderHistory;
use crate::repo::activity_repo::SqliteActivityRepository;
use crate::repo::attribute_repo::SqliteAttributeStore;
use crate::repo::notification_repo::SqliteNotificationRepository;
use crate::repo::RepoResult;
use crate::service::inbox_service::InboxService;
use crate::service::member_service::{MemberService, UpdateProfileRequest, UpdateSettingsRequest};
use crate::service::stats_service::StatsService;
use crate::service::MutationOutcome;
use rusqlite::Connection;

type SqliteMemberService<'conn> =
    MemberService<SqliteAttributeStore<'conn>, SqliteActivityRepository<'conn>>;
type SqliteStatsService<'conn> = StatsService<
    SqliteAttributeStore<'conn>,
    SqliteActivityRepository<'conn>,
    SqliteNotificationRepository<'conn>,
>;

/// Explicit composition root over one migrated SQLite connection plus an
/// optional order-history collaborator.
pub struct MemberDashboard<'conn> {
    members: SqliteMemberService<'conn>,
    inbox: InboxService<SqliteNotificationRepository<'conn>>,
    stats: SqliteStatsService<'conn>,
    orders: Option<Box<dyn OrderHistory>>,
}

impl<'conn> MemberDashboard<'conn> {
    /// Builds the root from a migrated connection. Fails when the
    /// connection has not been through `open_db`/`open_db_in_memory`.
    pub fn try_new(
        conn: &'conn Connection,
        orders: Option<Box<dyn OrderHistory>>,
    ) -> RepoResult<Self> {
        let members = MemberService::new(
            SqliteAttributeStore::try_new(conn)?,
            SqliteActivityRepository::try_new(conn)?,
        );
        let inbox = InboxService::new(SqliteNotificationRepository::try_new(conn)?);
        let stats = StatsService::new(
            SqliteAttributeStore::try_new(conn)?,
            SqliteActivityRepository::try_new(conn)?,
            SqliteNotificationRepository::try_new(conn)?,
        );

        Ok(Self {
            members,
            inbox,
            stats,
            orders,
        })
    }

    pub fn profile(&self, user_id: i64) -> RepoResult<MemberProfile> {
        self.members.profile(user_id)
    }

    pub fn update_profile(
        &self,
        user_id: i64,
        request: &UpdateProfileRequest,
    ) -> MutationOutcome<MemberProfile> {
        self.members.update_profile(user_id, request)
    }

    pub fn settings(&self, user_id: i64) -> RepoResult<MemberSettings> {
        self.members.settings(user_id)
    }

    pub fn update_settings(
        &self,
        user_id: i64,
        request: &UpdateSettingsRequest,
    ) -> MutationOutcome<MemberSettings> {
        self.members.update_settings(user_id, request)
    }

    pub fn activity(&self, user_id: i64, limit: Option<u32>) -> RepoResult<Vec<ActivityEntry>> {
        self.members.activity(user_id, limit)
    }

    pub fn log_activity(
        &self,
        user_id: i64,
        kind: &str,
        description: &str,
        meta: Option<&serde_json::Value>,
    ) -> MutationOutcome<i64> {
        self.members.log_activity(user_id, kind, description, meta)
    }

    pub fn notifications(&self, user_id: i64, unread_only: bool) -> RepoResult<Vec<Notification>> {
        self.inbox.notifications(user_id, unread_only)
    }

    pub fn mark_notification_read(
        &self,
        user_id: i64,
        notification_id: i64,
    ) -> MutationOutcome<Notification> {
        self.inbox.mark_read(user_id, notification_id)
    }

    pub fn mark_all_notifications_read(&self, user_id: i64) -> MutationOutcome<u64> {
        self.inbox.mark_all_read(user_id)
    }

    pub fn stats(&self, user_id: i64) -> RepoResult<StatsSnapshot> {
        self.stats.stats(user_id, self.orders.as_deref())
    }
}
