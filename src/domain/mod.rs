mod metrics;
mod models;
mod repository;
mod validation;

// Publicly expose the Metrics abstraction
pub use metrics::{Metrics, MetricsPtr};

// Publicly expose persistence abstractions and records
pub use models::{
    Attendee, AttendeeSummary, NewAttendee, NewWebinar, Webinar, WebinarDetail, WebinarSummary,
};
pub use repository::{Repository, RepositoryPtr, StoreError};

// Publicly expose input validation
pub use validation::{
    parse_webinar_id, validate_new_webinar, validate_registration, FieldError,
};
