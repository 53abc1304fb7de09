use metrics::{counter, histogram};
use std::time::Instant;

/// Increment the counter for created webinars.
pub fn increment_webinar_created() {
    counter!("webinars_created_total").increment(1);
}

/// Increment the counter for successful attendee registrations.
pub fn increment_attendee_registered() {
    counter!("attendees_registered_total").increment(1);
}

/// Increment the counter for rejected duplicate registrations.
pub fn increment_duplicate_registration() {
    counter!("duplicate_registrations_total").increment(1);
}

/// Track HTTP request latency using a histogram.
pub fn track_http_request(start: Instant) {
    let elapsed = start.elapsed();
    histogram!("http_request_duration_seconds").record(elapsed);
}
