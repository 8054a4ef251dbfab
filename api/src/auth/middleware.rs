use axum::{
    body::Body,
    extract::{ConnectInfo, FromRequestParts, State},
    http::{Method, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::TypedHeader;
use headers::{Authorization, Origin, UserAgent, authorization::Bearer};
use std::net::SocketAddr;
use tracing::info;
use util::state::AppState;

/// Logs method, path, IP address, user ID (if a valid token is present), origin, and
/// user-agent for each incoming HTTP request. Skips CORS preflight `OPTIONS` requests.
///
/// The user ID comes from the token alone; no account lookup happens here.
///
/// ### Usage:
/// ```ignore
/// let app = Router::new().layer(from_fn_with_state(state, log_request));
/// ```
pub async fn log_request(State(state): State<AppState>, req: Request<Body>, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    if parts.method == Method::OPTIONS {
        let req = Request::from_parts(parts, body);
        return next.run(req).await;
    }

    let user_id = TypedHeader::<Authorization<Bearer>>::from_request_parts(&mut parts, &state)
        .await
        .ok()
        .and_then(|TypedHeader(Authorization(bearer))| state.tokens().verify(bearer.token()).ok())
        .map(|claims| claims.sub);

    // Absent when the router is driven without a socket, e.g. in tests.
    let ip = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    let origin = TypedHeader::<Origin>::from_request_parts(&mut parts, &state)
        .await
        .ok()
        .map(|TypedHeader(o)| o.to_string());

    let user_agent = TypedHeader::<UserAgent>::from_request_parts(&mut parts, &state)
        .await
        .ok()
        .map(|TypedHeader(ua)| ua.to_string());

    info!(
        method = ?parts.method,
        path = %parts.uri.path(),
        ip = ip.unwrap_or_else(|| "unknown".into()),
        user = user_id.unwrap_or(0),
        origin = origin.unwrap_or_else(|| "unknown".into()),
        user_agent = user_agent.unwrap_or_else(|| "unknown".into()),
        "Incoming request"
    );

    let req = Request::from_parts(parts, body);
    next.run(req).await
}
