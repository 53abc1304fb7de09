use crate::domain::{Metrics, MetricsPtr};
use std::sync::Arc;
use std::time::Instant;

/// No-op metrics implementation for testing.
pub struct NoopMetrics;

impl NoopMetrics {
    pub fn new() -> Self {
        NoopMetrics
    }
}

impl Metrics for NoopMetrics {
    // ---
    fn render(&self) -> String {
        String::new()
    }
    fn record_webinar_created(&self) {}
    fn record_attendee_registered(&self) {}
    fn record_duplicate_registration(&self) {}
    fn record_http_request(&self, _: Instant, _: &str, _: &str, _: u16) {}
}

/// Creates a new no-op metrics implementation.
///
/// All metrics calls are ignored. Useful for development, testing, or when
/// metrics are disabled.
pub fn create() -> anyhow::Result<MetricsPtr> {
    Ok(Arc::new(NoopMetrics::new()))
}
