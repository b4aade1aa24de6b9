//! Input sanitization and validation helpers for mutation requests.
//!
//! # Responsibility
//! - Normalize free-text fields (trim, strip control characters).
//! - Validate URL-shaped and enumerated fields before anything is
//!   persisted.

use once_cell::sync::Lazy;
use regex::Regex;

static CONTROL_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").expect("valid control-char regex"));
static HTTP_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s]+$").expect("valid url regex"));
static LANGUAGE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{2}$").expect("valid language-code regex"));

/// Normalizes one free-text input field: strips control characters,
/// collapses newlines into spaces and trims surrounding whitespace.
pub fn sanitize_text(value: &str) -> String {
    let without_controls = CONTROL_CHARS_RE.replace_all(value, "");
    without_controls
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

/// Returns whether `value` looks like an absolute http(s) URL.
pub fn is_valid_http_url(value: &str) -> bool {
    HTTP_URL_RE.is_match(value)
}

/// Returns whether `value` is a two-letter lowercase language code.
pub fn is_valid_language_code(value: &str) -> bool {
    LANGUAGE_CODE_RE.is_match(value)
}
