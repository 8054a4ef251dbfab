use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::{format_validation_errors, normalize_email};
use serde::{Deserialize, Serialize};
use services::password::Argon2Hasher;
use services::user_service::{Session, UserService};
use util::state::AppState;
use validator::Validate;

use crate::response::{ApiResponse, ValidJson, service_error};
use crate::routes::users::common::UserResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: String,
    pub user: UserResponse,
}

impl From<Session> for AuthResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token.token,
            expires_at: session.token.expires_at.to_rfc3339(),
            user: UserResponse::from(session.user),
        }
    }
}

/// POST /auth/register
///
/// Creates a `user` account and signs it in. Any role in the body is ignored.
///
/// ### Request Body
/// ```json
/// {
///   "name": "Ann",
///   "email": "ann@example.com",
///   "password": "secret1"
/// }
/// ```
///
/// ### Responses
///
/// - `201 Created`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "token": "jwt_token_here",
///     "expires_at": "2025-05-30T11:00:00+00:00",
///     "user": { "id": 1, "name": "Ann", "email": "ann@example.com", "role": "user" }
///   },
///   "message": "User registered successfully"
/// }
/// ```
///
/// - `400 Bad Request` on validation failure or `"Email already registered"`
pub async fn register(
    State(app_state): State<AppState>,
    ValidJson(mut req): ValidJson<RegisterRequest>,
) -> impl IntoResponse {
    // Surrounding whitespace and case are not part of the address.
    req.email = normalize_email(&req.email);

    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<AuthResponse>::error(error_message)),
        );
    }

    match UserService::register(
        app_state.db(),
        &Argon2Hasher,
        app_state.tokens(),
        &req.name,
        &req.email,
        &req.password,
    )
    .await
    {
        Ok(session) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                AuthResponse::from(session),
                "User registered successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// POST /auth/login
///
/// Authenticate an existing account and issue a bearer token.
///
/// ### Responses
/// - `200 OK` with the same payload as registration
/// - `401 Unauthorized` with `"Invalid email or password"`
pub async fn login(
    State(app_state): State<AppState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<AuthResponse>::error(error_message)),
        );
    }

    match UserService::login(
        app_state.db(),
        &Argon2Hasher,
        app_state.tokens(),
        &req.email,
        &req.password,
    )
    .await
    {
        Ok(session) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                AuthResponse::from(session),
                "Login successful",
            )),
        ),
        Err(e) => service_error(e),
    }
}
