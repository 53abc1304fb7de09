//! Input validation for the API's request bodies.
//!
//! Each DTO gets one explicit validation function returning either the
//! normalized domain input or a list of `{field, reason}` errors. Field
//! normalization (trimming, email lowercasing) happens here so that stores
//! only ever see canonical values.

use super::models::{NewAttendee, NewWebinar};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use uuid::Uuid;

/// A single field-level validation failure.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    // ---
    pub field: &'static str,
    pub reason: String,
}

impl FieldError {
    fn required(field: &'static str) -> Self {
        // ---
        Self {
            field,
            reason: format!("{field} is required"),
        }
    }
}

/// Matches one non-whitespace local part, an `@`, and a dotted domain.
/// Intentionally loose; the store key is the normalized address itself.
fn email_regex() -> &'static Regex {
    // ---
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"))
}

/// Checks whether `raw` is a structurally valid webinar identifier.
///
/// Runs before any store lookup so malformed ids never reach the backend.
pub fn parse_webinar_id(raw: &str) -> Option<Uuid> {
    // ---
    Uuid::parse_str(raw).ok()
}

/// Validates webinar-creation input.
///
/// - `title`: required, non-empty after trimming.
/// - `description`: optional, trimmed, defaults to the empty string.
/// - `scheduled_at`: required, RFC 3339 timestamp.
pub fn validate_new_webinar(
    title: Option<&str>,
    description: Option<&str>,
    scheduled_at: Option<&str>,
) -> Result<NewWebinar, Vec<FieldError>> {
    // ---
    let mut errors = Vec::new();

    let title = title.map(str::trim).unwrap_or_default();
    if title.is_empty() {
        errors.push(FieldError::required("title"));
    }

    let description = description.map(str::trim).unwrap_or_default();

    let mut parsed_schedule: Option<DateTime<Utc>> = None;
    match scheduled_at.map(str::trim) {
        None | Some("") => errors.push(FieldError::required("scheduledAt")),
        Some(raw) => match DateTime::parse_from_rfc3339(raw) {
            Ok(ts) => parsed_schedule = Some(ts.with_timezone(&Utc)),
            Err(_) => errors.push(FieldError {
                field: "scheduledAt",
                reason: "scheduledAt must be an RFC 3339 timestamp".to_string(),
            }),
        },
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewWebinar {
        title: title.to_string(),
        description: description.to_string(),
        scheduled_at: parsed_schedule.expect("validated above"),
    })
}

/// Validates and normalizes attendee-registration input.
///
/// - `email`: required, must look like an email address; stored lowercased
///   and trimmed. Normalization happens before the uniqueness comparison, so
///   `"A@B.com "` and `"a@b.com"` are the same registration.
/// - `full_name`: required, non-empty after trimming.
pub fn validate_registration(
    webinar_id: Uuid,
    email: Option<&str>,
    full_name: Option<&str>,
) -> Result<NewAttendee, Vec<FieldError>> {
    // ---
    let mut errors = Vec::new();

    let email = email.map(str::trim).unwrap_or_default().to_lowercase();
    if email.is_empty() {
        errors.push(FieldError::required("email"));
    } else if !email_regex().is_match(&email) {
        errors.push(FieldError {
            field: "email",
            reason: "email must be a valid email address".to_string(),
        });
    }

    let full_name = full_name.map(str::trim).unwrap_or_default();
    if full_name.is_empty() {
        errors.push(FieldError::required("fullName"));
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewAttendee {
        webinar_id,
        email,
        full_name: full_name.to_string(),
    })
}
