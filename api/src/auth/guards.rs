use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use db::models::user::Role;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::auth::extractors::AuthRejection;
use crate::response::ApiResponse;

/// Helper to resolve the caller and insert it into the request extensions.
async fn extract_and_insert_authuser(
    state: &AppState,
    req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), AuthRejection> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, state).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Rejects callers whose role is not in `allowed`, naming the roles that would pass.
async fn allow_roles(
    state: &AppState,
    req: Request<Body>,
    next: Next,
    allowed: &[Role],
) -> Result<Response, AuthRejection> {
    let (req, user) = extract_and_insert_authuser(state, req).await?;

    if !allowed.contains(&user.0.role) {
        let required = allowed
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(" or ");
        tracing::debug!(user_id = user.0.id, role = %user.0.role, required = %required, "Role guard rejected request");
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error(format!(
                "Access denied. Required role: {}",
                required
            ))),
        ));
    }

    Ok(next.run(req).await)
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AuthRejection> {
    let (req, _user) = extract_and_insert_authuser(&state, req).await?;

    Ok(next.run(req).await)
}

/// Admin-only guard.
pub async fn allow_admin(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AuthRejection> {
    allow_roles(&state, req, next, &[Role::Admin]).await
}

/// Guard for support staff: admins and agents.
pub async fn allow_staff(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AuthRejection> {
    allow_roles(&state, req, next, &[Role::Admin, Role::Agent]).await
}
