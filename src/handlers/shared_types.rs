use crate::domain::{FieldError, StoreError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Wrapper type for successful API responses.
///
/// Encapsulates the data payload in the uniform `{success, data}` envelope
/// and prepares it for JSON serialization.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    // ---
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        axum::Json(self).into_response()
    }
}

/// Error body of the uniform envelope: `{success: false, message, errorCode?}`.
#[derive(Serialize)]
struct ErrorEnvelope {
    // ---
    success: bool,
    message: String,
    #[serde(rename = "errorCode", skip_serializing_if = "Option::is_none")]
    error_code: Option<&'static str>,
}

/// Client-facing error taxonomy for the whole API surface.
///
/// Every failure leaving a handler is one of these; `IntoResponse` renders
/// the uniform error envelope with the matching status code.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or missing required input fields.
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// The supplied identifier is not structurally valid.
    #[error("Invalid webinar ID format")]
    InvalidId,

    /// The referenced webinar does not exist.
    #[error("Webinar not found")]
    NotFound,

    /// The (webinar, email) pair is already registered.
    #[error("You are already registered for this webinar")]
    DuplicateRegistration,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        // ---
        match err {
            StoreError::DuplicateRegistration => ApiError::DuplicateRegistration,
            StoreError::Backend(err) => ApiError::Internal(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // ---
        let (status, message, error_code) = match &self {
            ApiError::Validation(errors) => {
                let message = errors
                    .iter()
                    .map(|e| e.reason.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                (StatusCode::BAD_REQUEST, message, None)
            }
            ApiError::InvalidId => (
                StatusCode::BAD_REQUEST,
                self.to_string(),
                Some("INVALID_WEBINAR_ID"),
            ),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                self.to_string(),
                Some("WEBINAR_NOT_FOUND"),
            ),
            ApiError::DuplicateRegistration => (
                StatusCode::CONFLICT,
                self.to_string(),
                Some("DUPLICATE_REGISTRATION"),
            ),
            ApiError::Internal(err) => {
                tracing::error!("internal error: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = ErrorEnvelope {
            success: false,
            message,
            error_code,
        };

        (status, axum::Json(body)).into_response()
    }
}
