//! Application state management.
//!
//! This module defines the shared state structure that gets passed to all
//! Axum handlers via the `State` extractor. The `AppState` contains the
//! repository backend and the metrics implementation.
//!
//! The state is designed to be cheaply cloneable (using `Arc` internally)
//! so it can be passed efficiently to each request handler without
//! expensive copying of resources.

use crate::domain::{MetricsPtr, RepositoryPtr};

/// Shared application state passed to all Axum handlers.
///
/// This struct serves as the Dependency Injection container for the
/// application. Handlers depend on the `Repository` and `Metrics`
/// abstractions, not on a concrete backend, so the same handler code runs
/// against Redis in production and the in-memory store in tests.
///
/// Built once in `create_router()` at startup, attached via
/// `.with_state(app_state)`, and cloned automatically by Axum per request.
#[derive(Clone)]
pub(crate) struct AppState {
    /// Repository abstraction for webinar and attendee persistence.
    repository: RepositoryPtr,

    /// Metrics implementation for recording application events.
    metrics: MetricsPtr,
}

impl AppState {
    // ---

    pub fn new(repository: RepositoryPtr, metrics: MetricsPtr) -> Self {
        // ---
        AppState {
            repository,
            metrics,
        }
    }

    /// Get a reference to the repository implementation.
    pub(crate) fn repository(&self) -> &RepositoryPtr {
        // ---
        &self.repository
    }

    /// Get a reference to the metrics implementation.
    pub(crate) fn metrics(&self) -> &MetricsPtr {
        // ---
        &self.metrics
    }
}
