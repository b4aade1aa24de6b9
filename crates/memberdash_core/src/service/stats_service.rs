//! Dashboard statistics aggregation.
//!
//! # Responsibility
//! - Compose activity, notification and profile reads with the external
//!   order-history collaborator into one snapshot.
//!
//! # Invariants
//! - Aggregation is read-only; no operation here writes.
//! - A missing or failing order-history collaborator degrades order
//!   fields to zeros instead of failing the snapshot.

use crate::model::stats::StatsSnapshot;
use crate::orders::{OrderHistory, PAID_ORDER_STATUSES};
use crate::repo::activity_repo::ActivityRepository;
use crate::repo::attribute_repo::AttributeStore;
use crate::repo::notification_repo::NotificationRepository;
use crate::repo::RepoResult;
use log::warn;

/// Placeholder until a membership integration exists; the dashboard
/// renders it verbatim.
const MEMBERSHIP_STATUS_PLACEHOLDER: &str = "inactive";

/// Read-only aggregator over the member-owned stores.
pub struct StatsService<S, A, N>
where
    S: AttributeStore,
    A: ActivityRepository,
    N: NotificationRepository,
{
    attributes: S,
    activity: A,
    notifications: N,
}

impl<S, A, N> StatsService<S, A, N>
where
    S: AttributeStore,
    A: ActivityRepository,
    N: NotificationRepository,
{
    pub fn new(attributes: S, activity: A, notifications: N) -> Self {
        Self {
            attributes,
            activity,
            notifications,
        }
    }

    /// Computes the member's stats snapshot on demand.
    pub fn stats(
        &self,
        user_id: i64,
        orders: Option<&dyn OrderHistory>,
    ) -> RepoResult<StatsSnapshot> {
        let activity_count = self.activity.count(user_id)?;
        let unread_notifications = self.notifications.count_unread(user_id)?;
        let profile = self.attributes.profile(user_id)?;

        let (order_count, total_spent) = match orders {
            Some(provider) => paid_order_summary(user_id, provider),
            None => (0, 0.0),
        };

        Ok(StatsSnapshot {
            activity_count,
            unread_notifications,
            order_count,
            total_spent: format!("{total_spent:.2}"),
            membership_status: MEMBERSHIP_STATUS_PLACEHOLDER.to_string(),
            profile_completeness: profile.completeness_percent(),
        })
    }
}

/// Sums the member's paid orders through the collaborator. Any backend
/// failure degrades to zeros; stats must never error because an optional
/// integration is down.
fn paid_order_summary(user_id: i64, provider: &dyn OrderHistory) -> (u64, f64) {
    let order_ids = match provider.order_ids(user_id, PAID_ORDER_STATUSES) {
        Ok(ids) => ids,
        Err(err) => {
            warn!("event=order_summary module=stats status=error user_id={user_id} error={err}");
            return (0, 0.0);
        }
    };

    let order_count = order_ids.len() as u64;
    let mut total_spent = 0.0;
    for order_id in order_ids {
        match provider.order_total(order_id) {
            Ok(total) => total_spent += total,
            Err(err) => {
                warn!(
                    "event=order_summary module=stats status=error user_id={user_id} order_id={order_id} error={err}"
                );
            }
        }
    }

    (order_count, total_spent)
}
