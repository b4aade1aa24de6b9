//! Derived dashboard statistics snapshot.

use serde::{Deserialize, Serialize};

/// On-demand aggregate over a member's owned data plus order history.
///
/// Never persisted; every field is always present so front ends can bind
/// without null checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Total activity log entries for the member.
    pub activity_count: u64,
    /// Unread notifications for the member.
    pub unread_notifications: u64,
    /// Orders in a paid state, from the order-history collaborator.
    pub order_count: u64,
    /// Sum of paid-order totals, formatted with two decimals (`"0.00"`
    /// when no collaborator is available).
    pub total_spent: String,
    /// Membership tiers are not implemented; always `"inactive"`.
    pub membership_status: String,
    /// Percentage (0-100) of tracked profile fields filled in.
    pub profile_completeness: u8,
}
