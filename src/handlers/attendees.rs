use crate::domain::{parse_webinar_id, Attendee, AttendeeSummary};
use crate::handlers::shared_types::{ApiError, ApiResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

/// Request body for attendee registration (POST /webinars/{id}/register).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAttendeeRequest {
    // ---
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Handler for registering an attendee (POST /webinars/{id}/register).
///
/// Delegates to the registration workflow: id parse, input validation and
/// normalization, webinar existence check, insert, then the best-effort
/// counter increment.
///
/// - `201 Created` with the stored attendee (email lowercased and trimmed).
/// - `400 Bad Request` for a malformed id or invalid fields.
/// - `404 Not Found` when the webinar does not exist.
/// - `409 Conflict` when this email is already registered for the webinar.
#[tracing::instrument(skip(state, id, req))]
pub async fn register_attendee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<RegisterAttendeeRequest>,
) -> Result<(StatusCode, ApiResponse<Attendee>), ApiError> {
    // ---
    let attendee = crate::registration::register_attendee(
        state.repository(),
        state.metrics(),
        &id,
        req.email.as_deref(),
        req.full_name.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, ApiResponse::new(attendee)))
}

/// Handler for listing a webinar's attendees (GET /webinars/{id}/attendees).
///
/// Returns `fullName`, `email` and `joinedAt` for every registration of the
/// given webinar, most recent first. The webinar must exist; listing an
/// unknown webinar is `404 Not Found`, not an empty list.
#[tracing::instrument(skip(state, id))]
pub async fn list_attendees(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, ApiResponse<Vec<AttendeeSummary>>), ApiError> {
    // ---
    let id = parse_webinar_id(&id).ok_or(ApiError::InvalidId)?;

    if state.repository().get_webinar(id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    let attendees = state.repository().list_attendees(id).await?;

    Ok((StatusCode::OK, ApiResponse::new(attendees)))
}
