//! # users Routes Module
//!
//! - `get.rs` — account and agent directories
//! - `put.rs` — role changes

pub mod common;
pub mod get;
pub mod put;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, put},
};
use util::state::AppState;

use crate::auth::guards::{allow_admin, allow_staff};
use get::{list_agents, list_users};
use put::update_role;

/// Builds the `/users` route group.
///
/// - `GET /users` → `list_users` (admin)
/// - `GET /users/agents` → `list_agents` (admin or agent)
/// - `PUT /users/{user_id}/role` → `update_role` (admin)
pub fn users_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_users).route_layer(from_fn_with_state(app_state.clone(), allow_admin)),
        )
        .route(
            "/agents",
            get(list_agents).route_layer(from_fn_with_state(app_state.clone(), allow_staff)),
        )
        .route(
            "/{user_id}/role",
            put(update_role).route_layer(from_fn_with_state(app_state, allow_admin)),
        )
}
