mod counters;
mod prometheus_metrics;

pub use prometheus_metrics::PrometheusMetrics;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::{Arc, OnceLock};

// Re-export utilities for internal use within this module
pub(crate) use counters::{
    increment_attendee_registered, increment_duplicate_registration, increment_webinar_created,
    track_http_request,
};

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// The global recorder handle, installed on first use.
///
/// The process can only hold one recorder, so every caller shares this
/// handle no matter how many metrics instances are created.
fn handle() -> &'static PrometheusHandle {
    // ---
    HANDLE.get_or_init(|| {
        PrometheusBuilder::new()
            .install_recorder()
            .expect("failed to install Prometheus recorder")
    })
}

/// Render the current metrics in Prometheus text format.
pub(crate) fn render_metrics() -> String {
    handle().render()
}

/// Creates a new Prometheus metrics implementation.
///
/// This implementation collects metrics in Prometheus format and can
/// expose them via HTTP endpoint for scraping.
///
/// Returns a fully initialized metrics instance ready for use.
pub fn create() -> anyhow::Result<crate::domain::MetricsPtr> {
    tracing::info!("Initializing Prometheus metrics");
    let _ = handle();

    Ok(Arc::new(PrometheusMetrics::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_returns_valid_metrics() {
        let result = create();
        assert!(result.is_ok());
    }

    #[test]
    fn test_create_is_idempotent() {
        // ---
        create().expect("first create");
        create().expect("second create");
        // Renders without panicking once the recorder is installed.
        let _ = render_metrics();
    }
}
