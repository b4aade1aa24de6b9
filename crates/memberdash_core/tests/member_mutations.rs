use memberdash_core::db::open_db_in_memory;
use memberdash_core::service::inbox_service::InboxService;
use memberdash_core::{
    ActivityRepository, AttributeStore, DashboardTheme, MemberService, NotificationKind,
    NotificationRepository, RepoError, RepoResult, SqliteActivityRepository, SqliteAttributeStore,
    SqliteNotificationRepository, UpdateProfileRequest, UpdateSettingsRequest,
};
use serde_json::json;

const MEMBER: i64 = 42;
const ANONYMOUS: i64 = 0;

fn member_service(
    conn: &rusqlite::Connection,
) -> MemberService<SqliteAttributeStore<'_>, SqliteActivityRepository<'_>> {
    MemberService::new(
        SqliteAttributeStore::try_new(conn).unwrap(),
        SqliteActivityRepository::try_new(conn).unwrap(),
    )
}

#[test]
fn settings_update_persists_merge_and_logs_one_activity_entry() {
    let conn = open_db_in_memory().unwrap();
    let service = member_service(&conn);

    let outcome = service.update_settings(
        MEMBER,
        &UpdateSettingsRequest {
            dashboard_theme: Some("dark".to_string()),
            ..UpdateSettingsRequest::default()
        },
    );

    assert!(outcome.success);
    assert!(outcome.errors.is_empty());
    let settings = outcome.data.unwrap();
    assert_eq!(settings.dashboard_theme, DashboardTheme::Dark);
    assert!(settings.email_notifications);
    assert!(!settings.marketing_emails);
    assert_eq!(settings.language, "en");

    assert_eq!(service.settings(MEMBER).unwrap(), settings);

    let entries = service.activity(MEMBER, None).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kind, "settings");
    assert_eq!(entries[0].description, "Settings updated via dashboard");
}

#[test]
fn profile_update_sanitizes_input_and_logs_profile_activity() {
    let conn = open_db_in_memory().unwrap();
    let service = member_service(&conn);

    let outcome = service.update_profile(
        MEMBER,
        &UpdateProfileRequest {
            bio: Some("  Rust developer  ".to_string()),
            website: Some("https://example.com".to_string()),
            ..UpdateProfileRequest::default()
        },
    );

    assert!(outcome.success);
    let profile = outcome.data.unwrap();
    assert_eq!(profile.bio.as_deref(), Some("Rust developer"));
    assert_eq!(profile.website.as_deref(), Some("https://example.com"));

    let entries = service.activity(MEMBER, None).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kind, "profile");
}

#[test]
fn anonymous_callers_are_rejected_before_any_write() {
    let conn = open_db_in_memory().unwrap();
    let service = member_service(&conn);

    let outcome = service.update_settings(
        ANONYMOUS,
        &UpdateSettingsRequest {
            dashboard_theme: Some("dark".to_string()),
            ..UpdateSettingsRequest::default()
        },
    );

    assert!(!outcome.success);
    assert!(outcome.data.is_none());
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].contains("logged in"));

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM member_attributes;", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(rows, 0);
    assert!(service.activity(ANONYMOUS, None).unwrap().is_empty());
}

#[test]
fn invalid_theme_is_a_validation_error_and_writes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = member_service(&conn);

    let outcome = service.update_settings(
        MEMBER,
        &UpdateSettingsRequest {
            dashboard_theme: Some("sepia".to_string()),
            ..UpdateSettingsRequest::default()
        },
    );

    assert!(!outcome.success);
    assert!(outcome.errors[0].contains("dashboardTheme"));

    assert_eq!(service.settings(MEMBER).unwrap(), Default::default());
    assert!(service.activity(MEMBER, None).unwrap().is_empty());
}

/// Activity repository stub whose appends always fail, for exercising the
/// best-effort side-effect contract.
struct FailingActivityRepo;

impl ActivityRepository for FailingActivityRepo {
    fn append(
        &self,
        _user_id: i64,
        _kind: &str,
        _description: &str,
        _meta: Option<&serde_json::Value>,
    ) -> RepoResult<i64> {
        Err(RepoError::InvalidData("activity store down".to_string()))
    }

    fn list(
        &self,
        _user_id: i64,
        _limit: u32,
    ) -> RepoResult<Vec<memberdash_core::ActivityEntry>> {
        Ok(Vec::new())
    }

    fn count(&self, _user_id: i64) -> RepoResult<u64> {
        Ok(0)
    }
}

#[test]
fn failed_activity_side_effect_never_fails_the_primary_write() {
    let conn = open_db_in_memory().unwrap();
    let service = MemberService::new(
        SqliteAttributeStore::try_new(&conn).unwrap(),
        FailingActivityRepo,
    );

    let outcome = service.update_settings(
        MEMBER,
        &UpdateSettingsRequest {
            marketing_emails: Some(true),
            ..UpdateSettingsRequest::default()
        },
    );

    assert!(outcome.success, "primary write must survive side-effect failure");
    assert!(outcome.data.unwrap().marketing_emails);

    let persisted = SqliteAttributeStore::try_new(&conn)
        .unwrap()
        .settings(MEMBER)
        .unwrap();
    assert!(persisted.marketing_emails);
}

#[test]
fn log_activity_returns_entry_id_and_persists_meta() {
    let conn = open_db_in_memory().unwrap();
    let service = member_service(&conn);

    let meta = json!({ "source": "dashboard" });
    let outcome = service.log_activity(MEMBER, "login", "Logged in", Some(&meta));
    assert!(outcome.success);
    let entry_id = outcome.data.unwrap();

    let entries = service.activity(MEMBER, None).unwrap();
    assert_eq!(entries[0].id, entry_id);
    assert!(entries[0].meta.as_deref().unwrap().contains("dashboard"));
}

#[test]
fn log_activity_requires_a_description_and_defaults_the_kind() {
    let conn = open_db_in_memory().unwrap();
    let service = member_service(&conn);

    let rejected = service.log_activity(MEMBER, "login", "   ", None);
    assert!(!rejected.success);
    assert!(rejected.errors[0].contains("description"));

    let defaulted = service.log_activity(MEMBER, "  ", "Something happened", None);
    assert!(defaulted.success);
    let entries = service.activity(MEMBER, None).unwrap();
    assert_eq!(entries[0].kind, "general");
}

#[test]
fn inbox_mutations_use_the_uniform_envelope() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNotificationRepository::try_new(&conn).unwrap();
    let inbox = InboxService::new(SqliteNotificationRepository::try_new(&conn).unwrap());

    let id = repo
        .insert(MEMBER, NotificationKind::Info, "Welcome!", "Ready.")
        .unwrap();

    let anonymous = inbox.mark_read(ANONYMOUS, id);
    assert!(!anonymous.success);
    assert!(anonymous.errors[0].contains("logged in"));

    let first = inbox.mark_read(MEMBER, id);
    assert!(first.success);
    assert!(first.data.unwrap().is_read);

    let second = inbox.mark_read(MEMBER, id);
    assert!(!second.success);
    assert_eq!(
        second.errors,
        vec!["Notification not found or already read.".to_string()]
    );

    repo.insert(MEMBER, NotificationKind::Info, "One", "more.")
        .unwrap();
    repo.insert(MEMBER, NotificationKind::Info, "Two", "more.")
        .unwrap();

    let bulk = inbox.mark_all_read(MEMBER);
    assert!(bulk.success);
    assert_eq!(bulk.data, Some(2));
}
