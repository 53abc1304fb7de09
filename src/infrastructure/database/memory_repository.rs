//! In-memory repository backend.
//!
//! Used for development and deterministic tests. Semantics mirror the Redis
//! backend: the composite (webinar, email) key is claimed by a single set
//! mutation, and the attendee counter moves by exactly one per call, both
//! under the store lock so concurrent registrations cannot interleave.

use crate::domain::{
    Attendee, AttendeeSummary, NewAttendee, NewWebinar, Repository, RepositoryPtr, StoreError,
    Webinar, WebinarSummary,
};
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Creates a new in-memory repository.
pub fn create() -> anyhow::Result<RepositoryPtr> {
    // ---
    Ok(Arc::new(MemoryRepository::default()))
}

#[derive(Default)]
pub struct MemoryRepository {
    inner: Mutex<Store>,
}

#[derive(Default)]
struct Store {
    // ---
    webinars: HashMap<Uuid, Webinar>,
    attendees: Vec<Attendee>,
    /// Composite unique index over (webinar, normalized email).
    registered: HashSet<(Uuid, String)>,
}

#[async_trait::async_trait]
impl Repository for MemoryRepository {
    // ---
    async fn create_webinar(&self, new: NewWebinar) -> Result<Webinar, StoreError> {
        // ---
        let webinar = Webinar::new(new);

        let mut store = self.inner.lock().expect("store lock poisoned");
        store.webinars.insert(webinar.id, webinar.clone());

        Ok(webinar)
    }

    async fn list_webinars(&self) -> Result<Vec<WebinarSummary>, StoreError> {
        // ---
        let store = self.inner.lock().expect("store lock poisoned");

        let mut summaries: Vec<WebinarSummary> =
            store.webinars.values().map(WebinarSummary::from).collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(summaries)
    }

    async fn get_webinar(&self, id: Uuid) -> Result<Option<Webinar>, StoreError> {
        // ---
        let store = self.inner.lock().expect("store lock poisoned");

        Ok(store.webinars.get(&id).cloned())
    }

    async fn increment_attendee_count(&self, id: Uuid) -> Result<(), StoreError> {
        // ---
        let mut store = self.inner.lock().expect("store lock poisoned");

        // No-op for an unknown id, like an upsert-less document update.
        if let Some(webinar) = store.webinars.get_mut(&id) {
            webinar.attendee_count += 1;
            webinar.updated_at = Utc::now();
        }

        Ok(())
    }

    async fn insert_attendee(&self, new: NewAttendee) -> Result<Attendee, StoreError> {
        // ---
        let mut store = self.inner.lock().expect("store lock poisoned");

        // Claiming the composite key IS the uniqueness check; there is no
        // separate read that a concurrent insert could race past.
        if !store
            .registered
            .insert((new.webinar_id, new.email.clone()))
        {
            return Err(StoreError::DuplicateRegistration);
        }

        let attendee = Attendee::new(new);
        store.attendees.push(attendee.clone());

        Ok(attendee)
    }

    async fn list_attendees(&self, webinar_id: Uuid) -> Result<Vec<AttendeeSummary>, StoreError> {
        // ---
        let store = self.inner.lock().expect("store lock poisoned");

        let mut attendees: Vec<AttendeeSummary> = store
            .attendees
            .iter()
            .filter(|a| a.webinar_id == webinar_id)
            .map(AttendeeSummary::from)
            .collect();
        attendees.sort_by(|a, b| b.joined_at.cmp(&a.joined_at));

        Ok(attendees)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        // ---
        Ok(())
    }
}
