//! Prometheus metrics implementation.
//!
//! Concrete implementation of the `Metrics` trait in Prometheus text format.
//! Counter updates go through the global `metrics` crate registry (see
//! `counters.rs`); the recorder handle installed in `mod.rs` renders all
//! collected metrics on demand.

use crate::domain::Metrics;
use std::time::Instant;

/// Prometheus-based metrics implementation.
///
/// Intentionally empty: metrics are registered globally via `counter!()` and
/// `histogram!()` macros, and the global handle owns collection/rendering.
pub struct PrometheusMetrics {
    // Empty - uses global metrics registry pattern
}

impl PrometheusMetrics {
    pub fn new() -> Self {
        tracing::info!("Creating Prometheus metrics");
        PrometheusMetrics {}
    }
}

impl Metrics for PrometheusMetrics {
    fn render(&self) -> String {
        super::render_metrics()
    }

    fn record_webinar_created(&self) {
        tracing::debug!("Recording webinar created event");
        super::increment_webinar_created();
    }

    fn record_attendee_registered(&self) {
        tracing::debug!("Recording attendee registered event");
        super::increment_attendee_registered();
    }

    fn record_duplicate_registration(&self) {
        tracing::debug!("Recording duplicate registration event");
        super::increment_duplicate_registration();
    }

    fn record_http_request(&self, start: Instant, _path: &str, _method: &str, _status: u16) {
        super::track_http_request(start);
    }
}
