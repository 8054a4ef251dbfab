use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use services::user_service::UserService;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::{ApiResponse, ValidJson, service_error};
use crate::routes::users::common::{UpdateRoleRequest, UserResponse};

/// PUT /users/{user_id}/role
///
/// Changes an account's role. Admin only. Admins may change their own role.
///
/// ### Request Body
/// ```json
/// { "role": "agent" }
/// ```
///
/// ### Responses
/// - `200 OK` with the updated user
/// - `403 Forbidden` for non-admins
/// - `404 Not Found` if the user does not exist
pub async fn update_role(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
    user: AuthUser,
    ValidJson(req): ValidJson<UpdateRoleRequest>,
) -> impl IntoResponse {
    match UserService::update_role(app_state.db(), &user.actor(), user_id, req.role).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                UserResponse::from(updated),
                "User role updated successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}
