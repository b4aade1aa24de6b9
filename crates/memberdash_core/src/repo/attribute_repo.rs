//! Attribute document store contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the per-member `profile` and `settings` documents under
//!   `(user_id, kind)` as serialized JSON.
//! - Apply shallow merge-on-update: fetch current (or default), overwrite
//!   patched fields, write back the full document.
//!
//! # Invariants
//! - A missing document reads back as the kind's default, never an error.
//! - Reads never create a document; the first successful update does.
//! - Updates are read-modify-write at document granularity with
//!   last-writer-wins semantics (accepted trade-off, see DESIGN.md).

use crate::model::attributes::{
    MemberProfile, MemberSettings, ProfilePatch, SettingsPatch, KIND_PROFILE, KIND_SETTINGS,
};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Store interface for per-member attribute documents.
///
/// This is the seam a host with its own user-attribute storage (e.g. a
/// key-value user-meta service) implements instead of the SQLite default.
pub trait AttributeStore {
    /// Returns the persisted profile, or the empty default document.
    fn profile(&self, user_id: i64) -> RepoResult<MemberProfile>;

    /// Merges `patch` into the current profile and returns the full
    /// merged document.
    fn update_profile(&self, user_id: i64, patch: &ProfilePatch) -> RepoResult<MemberProfile>;

    /// Returns the persisted settings, or the default settings document.
    fn settings(&self, user_id: i64) -> RepoResult<MemberSettings>;

    /// Merges `patch` into the current settings and returns the full
    /// merged document.
    fn update_settings(&self, user_id: i64, patch: &SettingsPatch) -> RepoResult<MemberSettings>;
}

/// SQLite-backed attribute document store.
pub struct SqliteAttributeStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAttributeStore<'conn> {
    /// Constructs a store from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            "member_attributes",
            &["user_id", "kind", "document", "updated_at"],
        )?;
        Ok(Self { conn })
    }

    fn load_document<D>(&self, user_id: i64, kind: &str) -> RepoResult<D>
    where
        D: Default + DeserializeOwned,
    {
        let mut stmt = self.conn.prepare(
            "SELECT document FROM member_attributes WHERE user_id = ?1 AND kind = ?2;",
        )?;
        let mut rows = stmt.query(params![user_id, kind])?;
        if let Some(row) = rows.next()? {
            let raw: String = row.get("document")?;
            return serde_json::from_str(&raw).map_err(|err| {
                RepoError::InvalidData(format!(
                    "invalid `{kind}` document for user {user_id}: {err}"
                ))
            });
        }

        Ok(D::default())
    }

    fn save_document<D: Serialize>(&self, user_id: i64, kind: &str, document: &D) -> RepoResult<()> {
        let raw = serde_json::to_string(document).map_err(|err| {
            RepoError::InvalidData(format!(
                "unserializable `{kind}` document for user {user_id}: {err}"
            ))
        })?;

        self.conn.execute(
            "INSERT INTO member_attributes (user_id, kind, document, updated_at)
             VALUES (?1, ?2, ?3, (strftime('%s', 'now') * 1000))
             ON CONFLICT (user_id, kind) DO UPDATE SET
                document = excluded.document,
                updated_at = excluded.updated_at;",
            params![user_id, kind, raw],
        )?;

        Ok(())
    }
}

impl AttributeStore for SqliteAttributeStore<'_> {
    fn profile(&self, user_id: i64) -> RepoResult<MemberProfile> {
        self.load_document(user_id, KIND_PROFILE)
    }

    fn update_profile(&self, user_id: i64, patch: &ProfilePatch) -> RepoResult<MemberProfile> {
        let mut current: MemberProfile = self.load_document(user_id, KIND_PROFILE)?;
        current.apply(patch);
        self.save_document(user_id, KIND_PROFILE, &current)?;
        Ok(current)
    }

    fn settings(&self, user_id: i64) -> RepoResult<MemberSettings> {
        self.load_document(user_id, KIND_SETTINGS)
    }

    fn update_settings(&self, user_id: i64, patch: &SettingsPatch) -> RepoResult<MemberSettings> {
        let mut current: MemberSettings = self.load_document(user_id, KIND_SETTINGS)?;
        current.apply(patch);
        self.save_document(user_id, KIND_SETTINGS, &current)?;
        Ok(current)
    }
}
