//! Notification inbox use-case service.
//!
//! # Responsibility
//! - Expose inbox reads and the unread -> read transitions behind the
//!   identity gate and the uniform mutation envelope.
//!
//! # Invariants
//! - A missing id, a foreign owner and an already-read row are reported
//!   through one combined "not found or already read" outcome; the
//!   repository's conditional update does not distinguish them.

use crate::model::notification::Notification;
use crate::repo::notification_repo::NotificationRepository;
use crate::repo::RepoResult;
use crate::service::{
    is_resolved_member, MutationOutcome, AUTH_REQUIRED_MESSAGE, STORAGE_FAILURE_MESSAGE,
};
use log::error;

const NOT_FOUND_MESSAGE: &str = "Notification not found or already read.";

/// Use-case service for the per-member notification inbox.
pub struct InboxService<N: NotificationRepository> {
    notifications: N,
}

impl<N: NotificationRepository> InboxService<N> {
    pub fn new(notifications: N) -> Self {
        Self { notifications }
    }

    /// Lists the member's notifications newest-first, optionally unread
    /// only.
    pub fn notifications(&self, user_id: i64, unread_only: bool) -> RepoResult<Vec<Notification>> {
        self.notifications.list(user_id, unread_only)
    }

    /// Marks one owned notification as read and returns the updated row.
    pub fn mark_read(&self, user_id: i64, notification_id: i64) -> MutationOutcome<Notification> {
        if !is_resolved_member(user_id) {
            return MutationOutcome::rejected(AUTH_REQUIRED_MESSAGE);
        }

        match self.notifications.mark_read(notification_id, user_id) {
            Ok(Some(notification)) => MutationOutcome::ok(notification),
            Ok(None) => MutationOutcome::rejected(NOT_FOUND_MESSAGE),
            Err(err) => {
                error!(
                    "event=notification_mark_read module=inbox status=error user_id={user_id} notification_id={notification_id} error={err}"
                );
                MutationOutcome::rejected(STORAGE_FAILURE_MESSAGE)
            }
        }
    }

    /// Marks every unread notification owned by the member as read and
    /// returns how many rows transitioned.
    pub fn mark_all_read(&self, user_id: i64) -> MutationOutcome<u64> {
        if !is_resolved_member(user_id) {
            return MutationOutcome::rejected(AUTH_REQUIRED_MESSAGE);
        }

        match self.notifications.mark_all_read(user_id) {
            Ok(count) => MutationOutcome::ok(count),
            Err(err) => {
                error!(
                    "event=notification_mark_all module=inbox status=error user_id={user_id} error={err}"
                );
                MutationOutcome::rejected(STORAGE_FAILURE_MESSAGE)
            }
        }
    }
}
