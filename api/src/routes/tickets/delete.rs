use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use services::ticket_service::TicketService;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::{ApiResponse, Empty, service_error};

/// DELETE /tickets/{ticket_id}
///
/// Removes a ticket and its comments. Admin only.
///
/// ### Responses
/// - `200 OK`
/// - `403 Forbidden` for non-admins, whether or not the ticket exists
/// - `404 Not Found`
pub async fn delete_ticket(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
    user: AuthUser,
) -> impl IntoResponse {
    match TicketService::delete(app_state.db(), &user.actor(), ticket_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::<Empty>::success(Empty, "Ticket deleted successfully")),
        ),
        Err(e) => service_error(e),
    }
}
