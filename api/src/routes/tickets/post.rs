use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::format_validation_errors;
use services::ticket_service::{CreateTicket, TicketService};
use util::state::AppState;
use validator::Validate;

use crate::auth::AuthUser;
use crate::response::{ApiResponse, ValidJson, service_error};
use crate::routes::tickets::common::{CommentRequest, CreateTicketRequest, TicketResponse};

/// POST /tickets
///
/// Files a ticket owned by the caller. It starts `open` and unassigned.
///
/// ### Request Body
/// ```json
/// {
///   "title": "Printer broken",
///   "description": "Paper jam on floor 3",
///   "category": "technical",
///   "priority": "high"
/// }
/// ```
///
/// `category` defaults to `general` and `priority` to `medium`.
///
/// ### Responses
/// - `201 Created` with the ticket
/// - `400 Bad Request` when title or description is empty
pub async fn create_ticket(
    State(app_state): State<AppState>,
    user: AuthUser,
    ValidJson(req): ValidJson<CreateTicketRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<TicketResponse>::error(error_message)),
        );
    }

    let params = CreateTicket {
        title: req.title,
        description: req.description,
        category: req.category,
        priority: req.priority,
    };

    match TicketService::create(app_state.db(), &user.actor(), params).await {
        Ok(details) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                TicketResponse::from(details),
                "Ticket created successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}

/// POST /tickets/{ticket_id}/comment
///
/// Appends a comment. Allowed for the ticket's creator and for all agents and admins.
///
/// ### Request Body
/// ```json
/// { "text": "Any update on this?" }
/// ```
///
/// ### Responses
/// - `201 Created` with the full ticket including the new comment
/// - `400 Bad Request` for empty text
/// - `403 Forbidden` for users other than the creator
/// - `404 Not Found`
pub async fn add_comment(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
    user: AuthUser,
    ValidJson(req): ValidJson<CommentRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<TicketResponse>::error(error_message)),
        );
    }

    match TicketService::add_comment(app_state.db(), &user.actor(), ticket_id, &req.text).await {
        Ok(details) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                TicketResponse::from(details),
                "Comment added successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}
