use axum::{Json, http::StatusCode};
use serde::Serialize;
use services::error::ServiceError;

mod json;

pub use json::ValidJson;

/// Standardized API response wrapper for all outgoing JSON responses.
///
/// Every endpoint answers with the same shape:
/// ```json
/// {
///   "success": true,
///   "data": { ... },
///   "message": "Some message"
/// }
/// ```
///
/// - `T` is the type of the `data` payload.
/// - `success` is a boolean indicating operation status.
/// - `message` provides a human-readable context string.
///
/// ## Example (error):
/// ```json
/// {
///   "success": false,
///   "data": null,
///   "message": "Ticket not found"
/// }
/// ```
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: Option<T>,
    pub message: String,
}

/// Payload for responses that carry no data.
#[derive(Serialize, Debug, Clone, Copy)]
pub struct Empty;

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Constructs a success response with the given data and message.
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
        }
    }

    /// Constructs an error response with a message and `null` data.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
        }
    }
}

/// Maps a service failure to its status code and error envelope.
///
/// Store and internal failures are logged here and reported with a generic message.
pub fn service_error<T>(err: ServiceError) -> (StatusCode, Json<ApiResponse<T>>)
where
    T: Serialize,
{
    let status = match &err {
        ServiceError::Invalid(_) => StatusCode::BAD_REQUEST,
        ServiceError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
        ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Store(e) => {
            tracing::error!(error = %e, "Database error");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
        ServiceError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal error");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Internal server error")),
            );
        }
    };

    (status, Json(ApiResponse::error(err.to_string())))
}
