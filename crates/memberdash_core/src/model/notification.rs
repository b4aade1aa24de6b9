//! Notification domain record and state machine.
//!
//! # Invariants
//! - `read_at` is non-null iff `is_read` is true.
//! - Notifications transition unread -> read exactly once and are never
//!   deleted by the core.

use serde::{Deserialize, Serialize};

/// Notification category shown by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "info" => Some(Self::Info),
            "success" => Some(Self::Success),
            "warning" => Some(Self::Warning),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// One inbox notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Store-assigned row id.
    pub id: i64,
    pub user_id: i64,
    /// Serialized as `type` to match the wire schema.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    /// Insert timestamp in epoch milliseconds.
    pub created_at: i64,
    /// Read-transition timestamp in epoch milliseconds; set exactly once.
    pub read_at: Option<i64>,
}
