//! Domain model for member dashboard data.
//!
//! # Responsibility
//! - Define the typed records backing profile, settings, activity,
//!   notifications and the derived stats snapshot.
//! - Keep merge semantics for attribute documents next to the data they
//!   mutate.
//!
//! # Invariants
//! - Patch types expose exactly the fields a caller may merge; anything
//!   else is unrepresentable.
//! - Stored row ids are store-assigned and never reused.

pub mod activity;
pub mod attributes;
pub mod notification;
pub mod stats;
