use axum::response::IntoResponse;

pub async fn root_handler() -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");
    format!(
        r#"Welcome to the Webinar API 👋
Version: {version}

Available endpoints:
  - POST   /webinars                    - Create a webinar
  - GET    /webinars                    - List webinars, newest first
  - GET    /webinars/{{id}}              - Webinar detail with attendees
  - POST   /webinars/{{id}}/register     - Register an attendee
  - GET    /webinars/{{id}}/attendees    - List a webinar's attendees
  - GET    /health                      - Light health check
  - GET    /health?mode=full            - Full health check (includes the store)
  - GET    /metrics                     - Prometheus metrics

Responses use the uniform envelope: {{"success": true, "data": ...}} on
success, {{"success": false, "message": ..., "errorCode": ...}} on error.
"#
    )
}
