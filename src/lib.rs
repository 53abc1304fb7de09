// src/lib.rs
use anyhow::Result;
use app_state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

use handlers::{health_check, metrics_handler, root_handler};
use std::env;

// Public exports (visible outside this module)
pub mod domain;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod handlers;
mod infrastructure;
mod registration;

// Hoist up only the public symbol(s)
pub use registration::register_attendee;

pub use config::*;

pub use handlers::{ApiError, ApiResponse};

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    create_memory_repository, // ---
    create_noop_metrics,
    create_prom_metrics,
    create_redis_repository,
};

/// Build the HTTP router with repository and metrics backends determined by
/// environment variables.
///
/// - `WEBINAR_METRICS_TYPE`: `"prom"` for Prometheus, anything else (or
///   unset) for no-op metrics.
/// - `WEBINAR_REPOSITORY_TYPE`: `"memory"` for the in-memory store,
///   anything else (or unset) for Redis, which additionally requires
///   `WEBINAR_REDIS_URL`.
pub fn create_router() -> Result<Router> {
    // ---
    // Determine metrics implementation from environment
    let metrics_type = env::var("WEBINAR_METRICS_TYPE").unwrap_or_else(|_| "noop".to_string());
    let metrics = if metrics_type == "prom" {
        create_prom_metrics()?
    } else {
        create_noop_metrics()?
    };

    tracing_subscriber::fmt::try_init().ok(); // ignores if already initialized

    // Determine the store backend from environment. The in-memory backend
    // needs no configuration; Redis loads and validates its config eagerly.
    let repository_type =
        env::var("WEBINAR_REPOSITORY_TYPE").unwrap_or_else(|_| "redis".to_string());
    let repository = if repository_type == "memory" {
        create_memory_repository()?
    } else {
        let config = AppConfig::from_env()?;
        create_redis_repository(&config.redis)?
    };

    // Build application state with all dependencies
    let app_state = AppState::new(repository, metrics);

    let router = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route(
            "/webinars",
            post(handlers::create_webinar).get(handlers::list_webinars),
        )
        .route("/webinars/{id}", get(handlers::get_webinar))
        .route(
            "/webinars/{id}/register",
            post(handlers::register_attendee),
        )
        .route("/webinars/{id}/attendees", get(handlers::list_attendees))
        .with_state(app_state);

    Ok(router)
}
