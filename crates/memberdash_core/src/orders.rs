//! Order-history collaborator seam.
//!
//! # Responsibility
//! - Define the contract the stats aggregator queries for order counts
//!   and totals.
//!
//! # Invariants
//! - The core never owns order data; absence of a collaborator (or a
//!   failing one) degrades stats to zeros instead of erroring.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Order lifecycle states a caller may filter by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Completed,
    Processing,
    Pending,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Processing => "processing",
            Self::Pending => "pending",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
        }
    }
}

/// Statuses the dashboard counts as paid when aggregating stats.
pub const PAID_ORDER_STATUSES: &[OrderStatus] = &[OrderStatus::Completed, OrderStatus::Processing];

/// Failure reported by an order-history backend.
#[derive(Debug)]
pub enum OrderHistoryError {
    Backend(String),
}

impl Display for OrderHistoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend(message) => write!(f, "order history backend failure: {message}"),
        }
    }
}

impl Error for OrderHistoryError {}

/// External order-history source, keyed by the same member identity as
/// the owned stores.
pub trait OrderHistory {
    /// Returns ids of the member's orders in any of the given statuses.
    fn order_ids(
        &self,
        user_id: i64,
        statuses: &[OrderStatus],
    ) -> Result<Vec<i64>, OrderHistoryError>;

    /// Returns the monetary total of one order.
    fn order_total(&self, order_id: i64) -> Result<f64, OrderHistoryError>;
}
