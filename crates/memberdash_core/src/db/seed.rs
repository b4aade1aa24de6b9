//! Demo data seeding for one member.
//!
//! Mirrors the fixture set the dashboard ships for portfolio/demo
//! installs: a handful of activity entries and a small unread inbox.

use crate::model::notification::NotificationKind;
use crate::repo::activity_repo::{ActivityRepository, SqliteActivityRepository};
use crate::repo::notification_repo::{NotificationRepository, SqliteNotificationRepository};
use crate::repo::RepoResult;
use log::info;
use rusqlite::Connection;

const DEMO_ACTIVITY: &[(&str, &str)] = &[
    ("login", "User logged in from 192.168.1.1"),
    ("profile", "Profile bio updated"),
    ("settings", "Email notifications enabled"),
    ("login", "User logged in from 10.0.0.5"),
    ("profile", "Avatar image updated"),
];

const DEMO_NOTIFICATIONS: &[(NotificationKind, &str, &str)] = &[
    (
        NotificationKind::Info,
        "Welcome!",
        "Your member dashboard is ready.",
    ),
    (
        NotificationKind::Success,
        "Profile complete",
        "You have filled in all profile fields.",
    ),
    (
        NotificationKind::Warning,
        "Password expiry",
        "Your password expires in 30 days.",
    ),
    (
        NotificationKind::Info,
        "New feature",
        "Activity log is now available in your dashboard.",
    ),
];

/// Seeds demo activity and notifications for `user_id`.
///
/// Not idempotent: re-seeding appends another fixture set, matching how
/// demo installs behave on re-activation.
pub fn seed_demo_data(conn: &Connection, user_id: i64) -> RepoResult<()> {
    let activity = SqliteActivityRepository::try_new(conn)?;
    let notifications = SqliteNotificationRepository::try_new(conn)?;

    for (kind, description) in DEMO_ACTIVITY {
        activity.append(user_id, kind, description, None)?;
    }

    for (kind, title, message) in DEMO_NOTIFICATIONS {
        notifications.insert(user_id, *kind, title, message)?;
    }

    info!(
        "event=demo_seed module=db status=ok user_id={user_id} activity={} notifications={}",
        DEMO_ACTIVITY.len(),
        DEMO_NOTIFICATIONS.len()
    );

    Ok(())
}
