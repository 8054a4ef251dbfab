use axum::{Json, http::StatusCode, response::IntoResponse};

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::users::common::UserResponse;

/// GET /auth/me
///
/// Returns the account behind the bearer token.
///
/// ### Responses
/// - `200 OK` with the user projection
/// - `401 Unauthorized` if the token is missing, invalid, expired or names a deleted account
pub async fn get_me(AuthUser(user): AuthUser) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            UserResponse::from(user),
            "User data retrieved successfully",
        )),
    )
}
