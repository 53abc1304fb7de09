//! Attendee registration workflow.
//!
//! Orchestrates the one multi-step write path in the system: validate the
//! webinar id, normalize the submission, confirm the webinar exists, insert
//! the attendee, then bump the stored attendee counter. The insert and the
//! increment are two independent store calls in that order; no transaction
//! spans them.

use crate::domain::{
    parse_webinar_id, validate_registration, Attendee, MetricsPtr, RepositoryPtr, StoreError,
};
use crate::handlers::ApiError;

/// Registers `email` for the webinar identified by `raw_webinar_id`.
///
/// Step order is load-bearing:
/// 1. Id parse: malformed ids fail before any store access.
/// 2. Field validation and normalization (email lowercased + trimmed).
/// 3. Webinar existence check: an unknown webinar is `NotFound`, never
///    `DuplicateRegistration`.
/// 4. Insert: a composite-key violation surfaces from the storage layer as
///    `DuplicateRegistration` and is propagated as-is.
/// 5. Counter increment: best-effort after a successful insert. A failure
///    here is logged, not surfaced. The attendee record persists and the
///    stored counter may undercount until read through the detail view.
pub async fn register_attendee(
    repo: &RepositoryPtr,
    metrics: &MetricsPtr,
    raw_webinar_id: &str,
    email: Option<&str>,
    full_name: Option<&str>,
) -> Result<Attendee, ApiError> {
    // ---
    let webinar_id = parse_webinar_id(raw_webinar_id).ok_or(ApiError::InvalidId)?;

    let new = validate_registration(webinar_id, email, full_name).map_err(ApiError::Validation)?;

    if repo.get_webinar(webinar_id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    let attendee = match repo.insert_attendee(new).await {
        Ok(attendee) => attendee,
        Err(StoreError::DuplicateRegistration) => {
            metrics.record_duplicate_registration();
            return Err(ApiError::DuplicateRegistration);
        }
        Err(err) => return Err(err.into()),
    };

    if let Err(err) = repo.increment_attendee_count(webinar_id).await {
        tracing::warn!("attendee count increment failed for webinar {webinar_id}: {err}");
    }

    tracing::info!(
        "registered {} for webinar {}",
        attendee.email,
        attendee.webinar_id
    );
    metrics.record_attendee_registered();

    Ok(attendee)
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::domain::{
        AttendeeSummary, NewAttendee, NewWebinar, Repository, Webinar, WebinarSummary,
    };
    use crate::infrastructure::{create_memory_repository, create_noop_metrics};
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use uuid::Uuid;

    fn sample_webinar() -> NewWebinar {
        // ---
        NewWebinar {
            title: "Intro".to_string(),
            description: String::new(),
            scheduled_at: Utc::now(),
        }
    }

    async fn seeded_repo() -> (RepositoryPtr, Uuid) {
        // ---
        let repo = create_memory_repository().unwrap();
        let webinar = repo.create_webinar(sample_webinar()).await.unwrap();
        (repo, webinar.id)
    }

    /// Repository that panics on any access. Used to prove that malformed
    /// ids and invalid fields are rejected before the store is touched.
    struct UnreachableRepository;

    #[async_trait::async_trait]
    impl Repository for UnreachableRepository {
        // ---
        async fn create_webinar(&self, _new: NewWebinar) -> Result<Webinar, StoreError> {
            unreachable!("store must not be accessed")
        }
        async fn list_webinars(&self) -> Result<Vec<WebinarSummary>, StoreError> {
            unreachable!("store must not be accessed")
        }
        async fn get_webinar(&self, _id: Uuid) -> Result<Option<Webinar>, StoreError> {
            unreachable!("store must not be accessed")
        }
        async fn increment_attendee_count(&self, _id: Uuid) -> Result<(), StoreError> {
            unreachable!("store must not be accessed")
        }
        async fn insert_attendee(&self, _new: NewAttendee) -> Result<Attendee, StoreError> {
            unreachable!("store must not be accessed")
        }
        async fn list_attendees(
            &self,
            _webinar_id: Uuid,
        ) -> Result<Vec<AttendeeSummary>, StoreError> {
            unreachable!("store must not be accessed")
        }
        async fn ping(&self) -> Result<(), StoreError> {
            unreachable!("store must not be accessed")
        }
    }

    /// Wrapper that delegates everything but makes counter increments fail,
    /// and counts how often they were attempted.
    struct FailingIncrementRepository {
        inner: RepositoryPtr,
        attempts: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Repository for FailingIncrementRepository {
        // ---
        async fn create_webinar(&self, new: NewWebinar) -> Result<Webinar, StoreError> {
            self.inner.create_webinar(new).await
        }
        async fn list_webinars(&self) -> Result<Vec<WebinarSummary>, StoreError> {
            self.inner.list_webinars().await
        }
        async fn get_webinar(&self, id: Uuid) -> Result<Option<Webinar>, StoreError> {
            self.inner.get_webinar(id).await
        }
        async fn increment_attendee_count(&self, _id: Uuid) -> Result<(), StoreError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Backend(anyhow::anyhow!("increment refused")))
        }
        async fn insert_attendee(&self, new: NewAttendee) -> Result<Attendee, StoreError> {
            self.inner.insert_attendee(new).await
        }
        async fn list_attendees(
            &self,
            webinar_id: Uuid,
        ) -> Result<Vec<AttendeeSummary>, StoreError> {
            self.inner.list_attendees(webinar_id).await
        }
        async fn ping(&self) -> Result<(), StoreError> {
            self.inner.ping().await
        }
    }

    #[tokio::test]
    async fn malformed_id_fails_before_any_store_access() {
        // ---
        let repo: RepositoryPtr = Arc::new(UnreachableRepository);
        let metrics = create_noop_metrics().unwrap();

        let err = register_attendee(&repo, &metrics, "not-a-uuid", Some("x@y.com"), Some("X Y"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::InvalidId));
    }

    #[tokio::test]
    async fn invalid_fields_fail_before_any_store_access() {
        // ---
        let repo: RepositoryPtr = Arc::new(UnreachableRepository);
        let metrics = create_noop_metrics().unwrap();

        let err = register_attendee(
            &repo,
            &metrics,
            &Uuid::new_v4().to_string(),
            Some("not-an-email"),
            Some("X Y"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_webinar_is_not_found_never_duplicate() {
        // ---
        let (repo, _) = seeded_repo().await;
        let metrics = create_noop_metrics().unwrap();
        let missing = Uuid::new_v4().to_string();

        // Register the same pair twice against a nonexistent webinar; both
        // must report NotFound, proving the existence check precedes the
        // insert attempt.
        for _ in 0..2 {
            let err = register_attendee(&repo, &metrics, &missing, Some("x@y.com"), Some("X Y"))
                .await
                .unwrap_err();
            assert!(matches!(err, ApiError::NotFound));
        }
    }

    #[tokio::test]
    async fn successful_registration_normalizes_and_counts() {
        // ---
        let (repo, webinar_id) = seeded_repo().await;
        let metrics = create_noop_metrics().unwrap();

        let attendee = register_attendee(
            &repo,
            &metrics,
            &webinar_id.to_string(),
            Some("  A@B.com "),
            Some("  X Y "),
        )
        .await
        .unwrap();

        assert_eq!(attendee.email, "a@b.com");
        assert_eq!(attendee.full_name, "X Y");
        assert_eq!(attendee.webinar_id, webinar_id);

        let stored = repo.get_webinar(webinar_id).await.unwrap().unwrap();
        assert_eq!(stored.attendee_count, 1);
    }

    #[tokio::test]
    async fn duplicate_email_is_propagated_as_duplicate() {
        // ---
        let (repo, webinar_id) = seeded_repo().await;
        let metrics = create_noop_metrics().unwrap();
        let id = webinar_id.to_string();

        register_attendee(&repo, &metrics, &id, Some("A@B.com "), Some("X Y"))
            .await
            .unwrap();

        let err = register_attendee(&repo, &metrics, &id, Some("a@b.com"), Some("Other Name"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::DuplicateRegistration));

        // The counter only moved for the successful insert.
        let stored = repo.get_webinar(webinar_id).await.unwrap().unwrap();
        assert_eq!(stored.attendee_count, 1);
    }

    #[tokio::test]
    async fn n_registrations_increment_exactly_n_times() {
        // ---
        let (repo, webinar_id) = seeded_repo().await;
        let metrics = create_noop_metrics().unwrap();
        let id = webinar_id.to_string();

        for i in 0..5 {
            register_attendee(
                &repo,
                &metrics,
                &id,
                Some(&format!("user{i}@example.com")),
                Some("User Example"),
            )
            .await
            .unwrap();
        }

        let stored = repo.get_webinar(webinar_id).await.unwrap().unwrap();
        assert_eq!(stored.attendee_count, 5);
    }

    #[tokio::test]
    async fn increment_failure_does_not_fail_the_registration() {
        // ---
        let (inner, webinar_id) = seeded_repo().await;
        let failing = Arc::new(FailingIncrementRepository {
            inner: inner.clone(),
            attempts: AtomicUsize::new(0),
        });
        let repo: RepositoryPtr = failing.clone();
        let metrics = create_noop_metrics().unwrap();

        let attendee = register_attendee(
            &repo,
            &metrics,
            &webinar_id.to_string(),
            Some("x@y.com"),
            Some("X Y"),
        )
        .await
        .expect("registration succeeds despite the lost increment");

        // The increment ran once, after the insert.
        assert_eq!(failing.attempts.load(Ordering::SeqCst), 1);

        // The attendee record persists; the stored counter stays behind.
        let attendees = inner.list_attendees(webinar_id).await.unwrap();
        assert_eq!(attendees.len(), 1);
        assert_eq!(attendees[0].id, attendee.id);

        let stored = inner.get_webinar(webinar_id).await.unwrap().unwrap();
        assert_eq!(stored.attendee_count, 0);
    }

    #[tokio::test]
    async fn concurrent_same_pair_registrations_yield_one_winner() {
        // ---
        let (repo, webinar_id) = seeded_repo().await;
        let metrics = create_noop_metrics().unwrap();
        let id = webinar_id.to_string();

        let (left, right) = tokio::join!(
            register_attendee(&repo, &metrics, &id, Some("x@y.com"), Some("X Y")),
            register_attendee(&repo, &metrics, &id, Some("X@Y.com"), Some("X Y")),
        );

        let successes = [&left, &right].iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);

        let duplicate = [left, right]
            .into_iter()
            .find(|r| r.is_err())
            .unwrap()
            .unwrap_err();
        assert!(matches!(duplicate, ApiError::DuplicateRegistration));

        let stored = repo.get_webinar(webinar_id).await.unwrap().unwrap();
        assert_eq!(stored.attendee_count, 1);
    }
}
