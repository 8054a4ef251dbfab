use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use super::{ApiResponse, Empty};

/// JSON body extractor that answers malformed input with the standard error envelope.
///
/// Axum's own `Json` rejects with a plain-text body (and 415/422 codes). This wraps it so
/// a bad body, an unknown enum value or a missing content type all come back as
/// `400 { "success": false, "data": null, "message": ... }`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ApiResponse<Empty>>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ValidJson(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "Rejected request body");
                Err((
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(rejection.body_text())),
                ))
            }
        }
    }
}

