use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use services::ticket_service::TicketService;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::{ApiResponse, ValidJson, service_error};
use crate::routes::tickets::common::{TicketResponse, UpdateTicketRequest};

/// PUT /tickets/{ticket_id}
///
/// Changes status and/or assignee. What a caller may change depends on their role:
/// - users may not update tickets at all
/// - the assigned agent may set `status`, but not `assigned_to`
/// - admins may set `assigned_to` (an agent), but not `status`
///
/// A request containing any field outside the caller's rights is rejected whole.
///
/// ### Request Body
/// ```json
/// { "status": "in-progress" }
/// ```
/// or
/// ```json
/// { "assigned_to": 3 }
/// ```
///
/// ### Responses
/// - `200 OK` with the updated ticket
/// - `400 Bad Request` when the proposed assignee is not an agent
/// - `403 Forbidden` when the role rules reject the request
/// - `404 Not Found` for an unknown ticket or assignee
pub async fn update_ticket(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
    user: AuthUser,
    ValidJson(req): ValidJson<UpdateTicketRequest>,
) -> impl IntoResponse {
    match TicketService::apply_update(app_state.db(), &user.actor(), ticket_id, req.into()).await {
        Ok(details) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                TicketResponse::from(details),
                "Ticket updated successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}
