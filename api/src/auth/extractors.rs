use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use axum_extra::extract::TypedHeader;
use db::models::user;
use headers::{Authorization, authorization::Bearer};
use util::{state::AppState, token::TokenError};

use crate::auth::AuthUser;
use crate::response::{ApiResponse, Empty};

pub type AuthRejection = (StatusCode, Json<ApiResponse<Empty>>);

fn unauthorized(message: impl Into<String>) -> AuthRejection {
    (StatusCode::UNAUTHORIZED, Json(ApiResponse::error(message)))
}

/// Implements extraction of `AuthUser` from request headers.
///
/// Checks for a Bearer token in the `Authorization` header, verifies it with the
/// signer held in [`AppState`] and loads the account it names. If a guard already
/// resolved the account for this request, that copy is reused.
///
/// # Errors
/// - `401 Unauthorized` when the header is missing, the token is invalid or expired,
///   or the account no longer exists.
/// - `500 Internal Server Error` when the account lookup fails.
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| unauthorized("Not authorized, no token"))?;

        let claims = state
            .tokens()
            .verify(bearer.token())
            .map_err(|e| unauthorized(e.to_string()))?;

        match user::Model::get_by_id(state.db(), claims.sub).await {
            Ok(Some(user)) => Ok(AuthUser(user)),
            Ok(None) => {
                tracing::debug!(user_id = claims.sub, "Token names a missing account");
                Err(unauthorized(TokenError::Invalid.to_string()))
            }
            Err(e) => {
                tracing::error!(error = %e, user_id = claims.sub, "Failed to load token owner");
                Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::error("Database error")),
                ))
            }
        }
    }
}
