//! Per-member attribute documents: profile and settings.
//!
//! # Responsibility
//! - Define the two document kinds persisted under `(user_id, kind)`.
//! - Provide shallow-merge semantics: a patch overwrites only the fields
//!   it carries.
//!
//! # Invariants
//! - A missing stored document always reads back as the kind's default.
//! - Patch fields are the complete set of mergeable fields per kind.

use serde::{Deserialize, Serialize};

/// Storage key for the profile document kind.
pub const KIND_PROFILE: &str = "profile";

/// Storage key for the settings document kind.
pub const KIND_SETTINGS: &str = "settings";

/// Dashboard color theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardTheme {
    Light,
    Dark,
}

impl DashboardTheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parses a caller-supplied theme value. Unknown values yield `None`;
    /// callers decide whether that is a validation error.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// Extended member profile document.
///
/// All fields are optional; the default document is empty. Wire names are
/// camelCase to match the dashboard front end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MemberProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links: Option<Vec<String>>,
}

/// Fields tracked by the profile-completeness calculation, in the order
/// the dashboard reports them.
const COMPLETENESS_FIELDS: usize = 5;

impl MemberProfile {
    /// Overwrites exactly the fields present in `patch`.
    pub fn apply(&mut self, patch: &ProfilePatch) {
        if let Some(bio) = &patch.bio {
            self.bio = Some(bio.clone());
        }
        if let Some(avatar_url) = &patch.avatar_url {
            self.avatar_url = Some(avatar_url.clone());
        }
        if let Some(phone) = &patch.phone {
            self.phone = Some(phone.clone());
        }
        if let Some(location) = &patch.location {
            self.location = Some(location.clone());
        }
        if let Some(website) = &patch.website {
            self.website = Some(website.clone());
        }
        if let Some(social_links) = &patch.social_links {
            self.social_links = Some(social_links.clone());
        }
    }

    /// Percentage (0-100) of the five tracked profile fields that hold a
    /// non-empty value: bio, phone, location, website, avatar URL.
    pub fn completeness_percent(&self) -> u8 {
        let tracked = [
            self.bio.as_deref(),
            self.phone.as_deref(),
            self.location.as_deref(),
            self.website.as_deref(),
            self.avatar_url.as_deref(),
        ];
        let filled = tracked
            .iter()
            .filter(|value| value.is_some_and(|text| !text.is_empty()))
            .count();

        ((filled as f64 / COMPLETENESS_FIELDS as f64) * 100.0).round() as u8
    }
}

/// Shallow-merge patch for [`MemberProfile`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub social_links: Option<Vec<String>>,
}

/// Member dashboard settings document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MemberSettings {
    pub email_notifications: bool,
    pub marketing_emails: bool,
    pub dashboard_theme: DashboardTheme,
    pub language: String,
}

impl Default for MemberSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            marketing_emails: false,
            dashboard_theme: DashboardTheme::Light,
            language: "en".to_string(),
        }
    }
}

impl MemberSettings {
    /// Overwrites exactly the fields present in `patch`.
    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(email_notifications) = patch.email_notifications {
            self.email_notifications = email_notifications;
        }
        if let Some(marketing_emails) = patch.marketing_emails {
            self.marketing_emails = marketing_emails;
        }
        if let Some(dashboard_theme) = patch.dashboard_theme {
            self.dashboard_theme = dashboard_theme;
        }
        if let Some(language) = &patch.language {
            self.language = language.clone();
        }
    }
}

/// Shallow-merge patch for [`MemberSettings`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub email_notifications: Option<bool>,
    pub marketing_emails: Option<bool>,
    pub dashboard_theme: Option<DashboardTheme>,
    pub language: Option<String>,
}
