use super::models::{Attendee, AttendeeSummary, NewAttendee, NewWebinar, Webinar, WebinarSummary};
use std::sync::Arc;
use uuid::Uuid;

/// Errors surfaced from the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The (webinar, email) pair already exists. Raised by the storage
    /// mutation itself, never by an application-level pre-check.
    #[error("duplicate registration")]
    DuplicateRegistration,

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Abstraction for webinar and attendee persistence.
#[async_trait::async_trait]
pub trait Repository: Send + Sync {
    // ---

    // Webinar store ------------------------------------------------------

    /// Insert a new webinar record with a zero attendee count.
    async fn create_webinar(&self, new: NewWebinar) -> Result<Webinar, StoreError>;

    /// All webinars, ordered by creation time descending.
    async fn list_webinars(&self) -> Result<Vec<WebinarSummary>, StoreError>;

    /// Full webinar record, or `None` if no record matches.
    async fn get_webinar(&self, id: Uuid) -> Result<Option<Webinar>, StoreError>;

    /// Atomically add 1 to the stored attendee counter.
    ///
    /// Must be a single storage-level operation, never load/modify/store.
    async fn increment_attendee_count(&self, id: Uuid) -> Result<(), StoreError>;

    // Attendee store -----------------------------------------------------

    /// Insert a new attendee record.
    ///
    /// Fails with [`StoreError::DuplicateRegistration`] when the
    /// (webinar, email) pair is already registered.
    async fn insert_attendee(&self, new: NewAttendee) -> Result<Attendee, StoreError>;

    /// Attendees of one webinar, ordered by join time descending.
    async fn list_attendees(&self, webinar_id: Uuid) -> Result<Vec<AttendeeSummary>, StoreError>;

    // Health -------------------------------------------------------------

    /// Probe backend connectivity. Used by the full health check.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Type alias for any backend that implements Repository.
pub type RepositoryPtr = Arc<dyn Repository>;
