//! Activity log domain record.
//!
//! # Invariants
//! - Entries are immutable once written; the log is append-only.
//! - `id` and `created_at` are store-assigned at insert time.

use serde::{Deserialize, Serialize};

/// One append-only activity log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    /// Store-assigned monotonic row id.
    pub id: i64,
    pub user_id: i64,
    /// Free-form short tag (`login`, `profile`, `settings`, ...).
    /// Serialized as `type` to match the wire schema.
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable description of what happened.
    pub description: String,
    /// Optional structured payload, serialized as JSON text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    /// Insert timestamp in epoch milliseconds.
    pub created_at: i64,
}
