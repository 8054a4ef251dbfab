//! # tickets Routes Module
//!
//! Every route here sits behind `allow_authenticated`; the lifecycle service makes
//! the per-ticket decisions. Deleting additionally requires the admin guard.

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};
use util::state::AppState;

use crate::auth::guards::allow_admin;
use delete::delete_ticket;
use get::{get_ticket, list_tickets};
use post::{add_comment, create_ticket};
use put::update_ticket;

/// Builds the `/tickets` route group.
///
/// - `GET /tickets` → `list_tickets`
/// - `POST /tickets` → `create_ticket`
/// - `GET /tickets/{ticket_id}` → `get_ticket`
/// - `PUT /tickets/{ticket_id}` → `update_ticket`
/// - `DELETE /tickets/{ticket_id}` → `delete_ticket` (admin)
/// - `POST /tickets/{ticket_id}/comment` → `add_comment`
pub fn ticket_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_tickets).post(create_ticket))
        .route(
            "/{ticket_id}",
            delete(delete_ticket)
                .route_layer(from_fn_with_state(app_state, allow_admin))
                .get(get_ticket)
                .put(update_ticket),
        )
        .route("/{ticket_id}/comment", post(add_comment))
}
