//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into dashboard-facing operations.
//! - Gate mutations behind a resolved member identity and input
//!   validation, and wrap them in a uniform result envelope.
//!
//! # Invariants
//! - Mutation entry points never panic and never leak storage errors
//!   raw; the transport boundary always receives a well-formed envelope.
//! - Validation and authentication failures are detected before any
//!   write.

pub mod inbox_service;
pub mod member_service;
pub mod sanitize;
pub mod stats_service;

/// User-facing message for mutations attempted without a resolved member.
pub const AUTH_REQUIRED_MESSAGE: &str = "You must be logged in to manage your dashboard.";

/// User-facing message when the primary write fails in storage.
pub const STORAGE_FAILURE_MESSAGE: &str = "Something went wrong while saving your changes.";

/// Uniform `{success, data, errors}` envelope returned by every
/// mutation-shaped operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome<T> {
    pub success: bool,
    pub data: Option<T>,
    pub errors: Vec<String>,
}

impl<T> MutationOutcome<T> {
    /// Successful outcome carrying the affected entity.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// Failed outcome with one or more user-facing messages.
    pub fn failure(errors: Vec<String>) -> Self {
        Self {
            success: false,
            data: None,
            errors,
        }
    }

    /// Failed outcome with a single user-facing message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::failure(vec![message.into()])
    }
}

/// Returns whether `user_id` identifies a resolved member. Zero and
/// negative values are the anonymous sentinel and must be rejected by
/// every mutation.
pub(crate) fn is_resolved_member(user_id: i64) -> bool {
    user_id > 0
}
