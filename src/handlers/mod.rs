// Gateway module - controls public API for handlers
// Modules are private, only exported symbols are public

mod attendees;
mod health;
mod metrics;
mod root;
mod shared_types;
mod webinars;

// Core handlers
pub use health::health_check;
pub use metrics::metrics_handler;
pub use root::root_handler;

// Webinar handlers
pub use webinars::{create_webinar, get_webinar, list_webinars};

// Attendee handlers
pub use attendees::{list_attendees, register_attendee};

// Response envelope and error taxonomy, shared with the workflow layer
pub use shared_types::{ApiError, ApiResponse};
