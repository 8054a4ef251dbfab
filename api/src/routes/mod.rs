//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → Health check endpoint (public)
//! - `/auth` → Registration, login and the current account
//! - `/tickets` → Ticket filing, updates and comments (authenticated; delete is admin-only)
//! - `/users` → Account directory and role management (admin, agents may list agents)

use crate::routes::{
    auth::auth_routes, health::health_routes, tickets::ticket_routes, users::users_routes,
};
use axum::{Router, middleware::from_fn_with_state};
use util::state::AppState;

use crate::auth::guards::allow_authenticated;

pub mod auth;
pub mod health;
pub mod tickets;
pub mod users;

/// Builds the complete application router for all HTTP endpoints.
///
/// Per-route role guards live inside each group; the groups themselves decide
/// whether the whole subtree requires a signed-in caller.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest(
            "/tickets",
            ticket_routes(app_state.clone())
                .route_layer(from_fn_with_state(app_state.clone(), allow_authenticated)),
        )
        .nest(
            "/users",
            users_routes(app_state.clone())
                .route_layer(from_fn_with_state(app_state.clone(), allow_authenticated)),
        )
        .with_state(app_state)
}
