//! Core data layer for the member dashboard.
//! This crate is the single source of truth for member-data invariants:
//! attribute document merges, the append-only activity log, notification
//! read-state transitions and the derived stats snapshot.

pub mod dashboard;
pub mod db;
pub mod logging;
pub mod model;
pub mod orders;
pub mod repo;
pub mod service;

pub use dashboard::MemberDashboard;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::activity::ActivityEntry;
pub use model::attributes::{
    DashboardTheme, MemberProfile, MemberSettings, ProfilePatch, SettingsPatch,
};
pub use model::notification::{Notification, NotificationKind};
pub use model::stats::StatsSnapshot;
pub use orders::{OrderHistory, OrderHistoryError, OrderStatus, PAID_ORDER_STATUSES};
pub use repo::activity_repo::{ActivityRepository, SqliteActivityRepository};
pub use repo::attribute_repo::{AttributeStore, SqliteAttributeStore};
pub use repo::notification_repo::{NotificationRepository, SqliteNotificationRepository};
pub use repo::{RepoError, RepoResult};
pub use service::inbox_service::InboxService;
pub use service::member_service::{MemberService, UpdateProfileRequest, UpdateSettingsRequest};
pub use service::stats_service::StatsService;
pub use service::MutationOutcome;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
