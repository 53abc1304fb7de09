use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A webinar record as persisted in the store.
///
/// `attendee_count` is a denormalized counter maintained by the registration
/// workflow via an atomic storage-level increment. List views read it as-is;
/// the detail view recomputes the count from the joined attendee records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webinar {
    // ---
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub scheduled_at: DateTime<Utc>,
    pub attendee_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Webinar {
    // ---
    pub fn new(new: NewWebinar) -> Self {
        // ---
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            scheduled_at: new.scheduled_at,
            attendee_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Validated input for webinar creation. Fields are already trimmed.
#[derive(Debug, Clone)]
pub struct NewWebinar {
    // ---
    pub title: String,
    pub description: String,
    pub scheduled_at: DateTime<Utc>,
}

/// Projection of a webinar for the list view.
///
/// Excludes `description` and the attendee list; carries the stored
/// (denormalized) attendee counter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebinarSummary {
    // ---
    pub id: Uuid,
    pub title: String,
    pub scheduled_at: DateTime<Utc>,
    pub attendee_count: u64,
    pub created_at: DateTime<Utc>,
}

impl From<&Webinar> for WebinarSummary {
    fn from(webinar: &Webinar) -> Self {
        // ---
        Self {
            id: webinar.id,
            title: webinar.title.clone(),
            scheduled_at: webinar.scheduled_at,
            attendee_count: webinar.attendee_count,
            created_at: webinar.created_at,
        }
    }
}

/// Combined detail view: one webinar plus its full ordered attendee list.
///
/// `attendee_count` here is the live count of joined records, not the stored
/// counter: the two may diverge if an increment was lost after an insert.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebinarDetail {
    // ---
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub scheduled_at: DateTime<Utc>,
    pub attendee_count: u64,
    pub attendees: Vec<AttendeeSummary>,
    pub created_at: DateTime<Utc>,
}

impl WebinarDetail {
    /// Joins a webinar with its attendee list, computing the count from the
    /// joined records.
    pub fn join(webinar: Webinar, attendees: Vec<AttendeeSummary>) -> Self {
        // ---
        Self {
            id: webinar.id,
            title: webinar.title,
            description: webinar.description,
            scheduled_at: webinar.scheduled_at,
            attendee_count: attendees.len() as u64,
            attendees,
            created_at: webinar.created_at,
        }
    }
}

/// An attendee registration against one specific webinar.
///
/// The pair (`webinar_id`, `email`) is unique; `email` is stored lowercased
/// and trimmed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    // ---
    pub id: Uuid,
    pub webinar_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub joined_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Attendee {
    // ---
    pub fn new(new: NewAttendee) -> Self {
        // ---
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            webinar_id: new.webinar_id,
            email: new.email,
            full_name: new.full_name,
            joined_at: now,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Validated, normalized input for attendee registration.
#[derive(Debug, Clone)]
pub struct NewAttendee {
    // ---
    pub webinar_id: Uuid,
    pub email: String,
    pub full_name: String,
}

/// Projection of an attendee for list and detail views.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeSummary {
    // ---
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub joined_at: DateTime<Utc>,
}

impl From<&Attendee> for AttendeeSummary {
    fn from(attendee: &Attendee) -> Self {
        // ---
        Self {
            id: attendee.id,
            full_name: attendee.full_name.clone(),
            email: attendee.email.clone(),
            joined_at: attendee.joined_at,
        }
    }
}
