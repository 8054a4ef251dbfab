use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use services::user_service::UserService;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::{ApiResponse, service_error};
use crate::routes::users::common::UserResponse;

/// GET /users
///
/// Every account, most recently created first. Admin only.
///
/// ### Responses
/// - `200 OK` with an array of users (`id`, `name`, `email`, `role`, `created_at`)
/// - `403 Forbidden` for non-admins
pub async fn list_users(State(app_state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    match UserService::list_users(app_state.db(), &user.actor()).await {
        Ok(users) => {
            let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(users, "Users retrieved successfully")),
            )
        }
        Err(e) => service_error(e),
    }
}

/// GET /users/agents
///
/// Agent accounts sorted by name, for assignment pickers. Admins and agents.
pub async fn list_agents(State(app_state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    match UserService::list_agents(app_state.db(), &user.actor()).await {
        Ok(agents) => {
            let agents: Vec<UserResponse> = agents.into_iter().map(UserResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(agents, "Agents retrieved successfully")),
            )
        }
        Err(e) => service_error(e),
    }
}
