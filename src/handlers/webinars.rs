use crate::domain::{parse_webinar_id, validate_new_webinar, Webinar, WebinarDetail, WebinarSummary};
use crate::handlers::shared_types::{ApiError, ApiResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

/// Request body for webinar creation (POST /webinars).
///
/// All fields arrive as optional so missing values surface as field-level
/// validation errors rather than a deserialization failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWebinarRequest {
    // ---
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub scheduled_at: Option<String>,
}

/// Handler for creating a new webinar (POST /webinars).
///
/// - On success, responds `201 Created` with the full webinar object;
///   `attendeeCount` starts at 0.
/// - Missing or malformed `title`/`scheduledAt` respond `400 Bad Request`
///   with the offending fields named in the message.
#[tracing::instrument(skip(state, req))]
pub async fn create_webinar(
    State(state): State<AppState>,
    Json(req): Json<CreateWebinarRequest>,
) -> Result<(StatusCode, ApiResponse<Webinar>), ApiError> {
    // ---
    let new = validate_new_webinar(
        req.title.as_deref(),
        req.description.as_deref(),
        req.scheduled_at.as_deref(),
    )
    .map_err(ApiError::Validation)?;

    let webinar = state.repository().create_webinar(new).await?;

    tracing::info!("created webinar {} ({})", webinar.id, webinar.title);
    state.metrics().record_webinar_created();

    Ok((StatusCode::CREATED, ApiResponse::new(webinar)))
}

/// Handler for listing all webinars (GET /webinars).
///
/// Returns summaries ordered by creation time descending. Each summary
/// carries the stored attendee counter; the description and attendee list
/// are excluded from list views.
#[tracing::instrument(skip(state))]
pub async fn list_webinars(
    State(state): State<AppState>,
) -> Result<(StatusCode, ApiResponse<Vec<WebinarSummary>>), ApiError> {
    // ---
    let webinars = state.repository().list_webinars().await?;

    Ok((StatusCode::OK, ApiResponse::new(webinars)))
}

/// Handler for the webinar detail view (GET /webinars/{id}).
///
/// Composes two reads joined in application code: the webinar record and its
/// ordered attendee list. `attendeeCount` in this view is the live count of
/// joined records, not the stored counter, so it is the reconciliation point
/// if an increment was ever lost.
///
/// - `400 Bad Request` if the id is not well-formed (checked before any
///   store access).
/// - `404 Not Found` if no webinar matches.
#[tracing::instrument(skip(state, id))]
pub async fn get_webinar(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, ApiResponse<WebinarDetail>), ApiError> {
    // ---
    let id = parse_webinar_id(&id).ok_or(ApiError::InvalidId)?;

    let webinar = state
        .repository()
        .get_webinar(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let attendees = state.repository().list_attendees(id).await?;

    Ok((
        StatusCode::OK,
        ApiResponse::new(WebinarDetail::join(webinar, attendees)),
    ))
}
