//! Member mutation orchestration: profile and settings updates plus
//! explicit activity logging.
//!
//! # Responsibility
//! - Gate every mutation behind a resolved member identity.
//! - Sanitize and validate request input before any write.
//! - Record the activity side effect after a successful attribute write.
//!
//! # Invariants
//! - No partial writes: authentication/validation failures return before
//!   the attribute store is touched.
//! - The activity side effect is best-effort; its failure never rolls
//!   back or fails the already-persisted primary write.

use crate::model::activity::ActivityEntry;
use crate::model::attributes::{
    DashboardTheme, MemberProfile, MemberSettings, ProfilePatch, SettingsPatch,
};
use crate::repo::activity_repo::{normalize_activity_limit, ActivityRepository};
use crate::repo::attribute_repo::AttributeStore;
use crate::repo::RepoResult;
use crate::service::sanitize::{is_valid_http_url, is_valid_language_code, sanitize_text};
use crate::service::{
    is_resolved_member, MutationOutcome, AUTH_REQUIRED_MESSAGE, STORAGE_FAILURE_MESSAGE,
};
use log::{error, warn};

/// Activity tag recorded when a profile write succeeds.
const ACTIVITY_KIND_PROFILE: &str = "profile";
const PROFILE_UPDATED_DESCRIPTION: &str = "Profile updated via dashboard";

/// Activity tag recorded when a settings write succeeds.
const ACTIVITY_KIND_SETTINGS: &str = "settings";
const SETTINGS_UPDATED_DESCRIPTION: &str = "Settings updated via dashboard";

const ACTIVITY_KIND_DEFAULT: &str = "general";

/// Raw profile update input, prior to sanitization.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileRequest {
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub social_links: Option<Vec<String>>,
}

/// Raw settings update input, prior to validation.
#[derive(Debug, Clone, Default)]
pub struct UpdateSettingsRequest {
    pub email_notifications: Option<bool>,
    pub marketing_emails: Option<bool>,
    pub dashboard_theme: Option<String>,
    pub language: Option<String>,
}

/// Use-case service for member-owned attribute documents and the
/// activity log.
pub struct MemberService<S: AttributeStore, A: ActivityRepository> {
    attributes: S,
    activity: A,
}

impl<S: AttributeStore, A: ActivityRepository> MemberService<S, A> {
    pub fn new(attributes: S, activity: A) -> Self {
        Self {
            attributes,
            activity,
        }
    }

    /// Returns the member's profile document (default when absent).
    pub fn profile(&self, user_id: i64) -> RepoResult<MemberProfile> {
        self.attributes.profile(user_id)
    }

    /// Returns the member's settings document (defaults when absent).
    pub fn settings(&self, user_id: i64) -> RepoResult<MemberSettings> {
        self.attributes.settings(user_id)
    }

    /// Returns the most recent activity entries, newest first.
    pub fn activity(&self, user_id: i64, limit: Option<u32>) -> RepoResult<Vec<ActivityEntry>> {
        self.activity.list(user_id, normalize_activity_limit(limit))
    }

    /// Validates, merges and persists a profile update, then records the
    /// activity side effect.
    pub fn update_profile(
        &self,
        user_id: i64,
        request: &UpdateProfileRequest,
    ) -> MutationOutcome<MemberProfile> {
        if !is_resolved_member(user_id) {
            return MutationOutcome::rejected(AUTH_REQUIRED_MESSAGE);
        }

        let patch = match validate_profile_request(request) {
            Ok(patch) => patch,
            Err(errors) => return MutationOutcome::failure(errors),
        };

        match self.attributes.update_profile(user_id, &patch) {
            Ok(profile) => {
                self.append_activity_best_effort(
                    user_id,
                    ACTIVITY_KIND_PROFILE,
                    PROFILE_UPDATED_DESCRIPTION,
                );
                MutationOutcome::ok(profile)
            }
            Err(err) => {
                error!(
                    "event=profile_update module=member status=error user_id={user_id} error={err}"
                );
                MutationOutcome::rejected(STORAGE_FAILURE_MESSAGE)
            }
        }
    }

    /// Validates, merges and persists a settings update, then records the
    /// activity side effect.
    pub fn update_settings(
        &self,
        user_id: i64,
        request: &UpdateSettingsRequest,
    ) -> MutationOutcome<MemberSettings> {
        if !is_resolved_member(user_id) {
            return MutationOutcome::rejected(AUTH_REQUIRED_MESSAGE);
        }

        let patch = match validate_settings_request(request) {
            Ok(patch) => patch,
            Err(errors) => return MutationOutcome::failure(errors),
        };

        match self.attributes.update_settings(user_id, &patch) {
            Ok(settings) => {
                self.append_activity_best_effort(
                    user_id,
                    ACTIVITY_KIND_SETTINGS,
                    SETTINGS_UPDATED_DESCRIPTION,
                );
                MutationOutcome::ok(settings)
            }
            Err(err) => {
                error!(
                    "event=settings_update module=member status=error user_id={user_id} error={err}"
                );
                MutationOutcome::rejected(STORAGE_FAILURE_MESSAGE)
            }
        }
    }

    /// Appends one explicit activity entry on behalf of the caller and
    /// returns its id.
    pub fn log_activity(
        &self,
        user_id: i64,
        kind: &str,
        description: &str,
        meta: Option<&serde_json::Value>,
    ) -> MutationOutcome<i64> {
        if !is_resolved_member(user_id) {
            return MutationOutcome::rejected(AUTH_REQUIRED_MESSAGE);
        }

        let kind = sanitize_text(kind);
        let kind = if kind.is_empty() {
            ACTIVITY_KIND_DEFAULT
        } else {
            kind.as_str()
        };
        let description = sanitize_text(description);
        if description.is_empty() {
            return MutationOutcome::rejected("description is required.");
        }

        match self.activity.append(user_id, kind, &description, meta) {
            Ok(entry_id) => MutationOutcome::ok(entry_id),
            Err(err) => {
                error!(
                    "event=activity_append module=member status=error user_id={user_id} error={err}"
                );
                MutationOutcome::rejected(STORAGE_FAILURE_MESSAGE)
            }
        }
    }

    /// Named best-effort composition of a primary write with its activity
    /// side effect: a failure here is logged and swallowed because the
    /// primary write the caller asked for has already been persisted.
    fn append_activity_best_effort(&self, user_id: i64, kind: &str, description: &str) {
        if let Err(err) = self.activity.append(user_id, kind, description, None) {
            warn!(
                "event=activity_side_effect module=member status=error user_id={user_id} kind={kind} error={err}"
            );
        }
    }
}

/// Sanitizes a profile request into a typed patch, or returns every
/// field-level validation message at once.
pub fn validate_profile_request(request: &UpdateProfileRequest) -> Result<ProfilePatch, Vec<String>> {
    let mut errors = Vec::new();
    let mut patch = ProfilePatch {
        bio: request.bio.as_deref().map(sanitize_text),
        avatar_url: None,
        phone: request.phone.as_deref().map(sanitize_text),
        location: request.location.as_deref().map(sanitize_text),
        website: None,
        social_links: None,
    };

    if let Some(website) = request.website.as_deref() {
        let website = sanitize_text(website);
        if !website.is_empty() && !is_valid_http_url(&website) {
            errors.push("website must be a valid http(s) URL.".to_string());
        } else {
            patch.website = Some(website);
        }
    }

    if let Some(avatar_url) = request.avatar_url.as_deref() {
        let avatar_url = sanitize_text(avatar_url);
        if !avatar_url.is_empty() && !is_valid_http_url(&avatar_url) {
            errors.push("avatarUrl must be a valid http(s) URL.".to_string());
        } else {
            patch.avatar_url = Some(avatar_url);
        }
    }

    if let Some(social_links) = request.social_links.as_deref() {
        let mut links = Vec::with_capacity(social_links.len());
        for link in social_links {
            let link = sanitize_text(link);
            if link.is_empty() {
                continue;
            }
            if !is_valid_http_url(&link) {
                errors.push(format!("socialLinks entry `{link}` must be a valid http(s) URL."));
            } else {
                links.push(link);
            }
        }
        patch.social_links = Some(links);
    }

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}

/// Validates a settings request into a typed patch, or returns every
/// field-level validation message at once.
pub fn validate_settings_request(
    request: &UpdateSettingsRequest,
) -> Result<SettingsPatch, Vec<String>> {
    let mut errors = Vec::new();
    let mut patch = SettingsPatch {
        email_notifications: request.email_notifications,
        marketing_emails: request.marketing_emails,
        dashboard_theme: None,
        language: None,
    };

    if let Some(theme) = request.dashboard_theme.as_deref() {
        let theme = sanitize_text(theme).to_lowercase();
        match DashboardTheme::parse(&theme) {
            Some(parsed) => patch.dashboard_theme = Some(parsed),
            None => errors.push("dashboardTheme must be one of: light, dark.".to_string()),
        }
    }

    if let Some(language) = request.language.as_deref() {
        let language = sanitize_text(language).to_lowercase();
        if is_valid_language_code(&language) {
            patch.language = Some(language);
        } else {
            errors.push("language must be a two-letter ISO 639-1 code.".to_string());
        }
    }

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        validate_profile_request, validate_settings_request, UpdateProfileRequest,
        UpdateSettingsRequest,
    };
    use crate::model::attributes::DashboardTheme;

    #[test]
    fn profile_validation_trims_text_fields() {
        let request = UpdateProfileRequest {
            bio: Some("  hello there  ".to_string()),
            ..UpdateProfileRequest::default()
        };
        let patch = validate_profile_request(&request).unwrap();
        assert_eq!(patch.bio.as_deref(), Some("hello there"));
        assert!(patch.phone.is_none());
    }

    #[test]
    fn profile_validation_rejects_bad_website() {
        let request = UpdateProfileRequest {
            website: Some("not-a-url".to_string()),
            ..UpdateProfileRequest::default()
        };
        let errors = validate_profile_request(&request).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("website"));
    }

    #[test]
    fn profile_validation_drops_empty_social_links() {
        let request = UpdateProfileRequest {
            social_links: Some(vec![
                "https://example.com/a".to_string(),
                "   ".to_string(),
            ]),
            ..UpdateProfileRequest::default()
        };
        let patch = validate_profile_request(&request).unwrap();
        assert_eq!(
            patch.social_links,
            Some(vec!["https://example.com/a".to_string()])
        );
    }

    #[test]
    fn settings_validation_parses_theme_case_insensitively() {
        let request = UpdateSettingsRequest {
            dashboard_theme: Some(" Dark ".to_string()),
            ..UpdateSettingsRequest::default()
        };
        let patch = validate_settings_request(&request).unwrap();
        assert_eq!(patch.dashboard_theme, Some(DashboardTheme::Dark));
    }

    #[test]
    fn settings_validation_collects_all_errors() {
        let request = UpdateSettingsRequest {
            dashboard_theme: Some("sepia".to_string()),
            language: Some("english".to_string()),
            ..UpdateSettingsRequest::default()
        };
        let errors = validate_settings_request(&request).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
