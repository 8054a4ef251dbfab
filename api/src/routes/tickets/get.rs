use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use services::ticket_service::TicketService;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::{ApiResponse, service_error};
use crate::routes::tickets::common::TicketResponse;

/// GET /tickets
///
/// Users see the tickets they filed; agents and admins see all tickets. Newest first.
pub async fn list_tickets(State(app_state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    match TicketService::list(app_state.db(), &user.actor()).await {
        Ok(tickets) => {
            let tickets: Vec<TicketResponse> =
                tickets.into_iter().map(TicketResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(tickets, "Tickets retrieved successfully")),
            )
        }
        Err(e) => service_error(e),
    }
}

/// GET /tickets/{ticket_id}
///
/// ### Responses
/// - `200 OK` with the ticket, its creator, assignee and comments
/// - `403 Forbidden` when a user asks for someone else's ticket
/// - `404 Not Found`
pub async fn get_ticket(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
    user: AuthUser,
) -> impl IntoResponse {
    match TicketService::get(app_state.db(), &user.actor(), ticket_id).await {
        Ok(details) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                TicketResponse::from(details),
                "Ticket retrieved successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}
