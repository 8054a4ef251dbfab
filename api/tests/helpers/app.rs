use api::{auth::middleware::log_request, routes::routes};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
    middleware::from_fn_with_state,
};
use db::models::user::{self, Role};
use db::test_utils::setup_test_db;
use serde_json::Value;
use services::password::{Argon2Hasher, CredentialHasher};
use std::sync::Arc;
use util::{state::AppState, token::JwtSigner};

pub const TEST_PASSWORD: &str = "password123";

/// A router over a fresh in-memory database, wired the same way as the server binary.
pub async fn make_test_app() -> (Router, AppState) {
    let db = setup_test_db().await;
    let app_state = AppState::new(db, Arc::new(JwtSigner::new("test-secret", 60)));

    let router = Router::new()
        .nest("/api", routes(app_state.clone()))
        .layer(from_fn_with_state(app_state.clone(), log_request));

    (router, app_state)
}

/// Inserts an account with [`TEST_PASSWORD`] and returns it with a signed token.
pub async fn seed_user(app_state: &AppState, name: &str, role: Role) -> (user::Model, String) {
    let email = format!("{}@test.com", name.to_lowercase());
    let hash = Argon2Hasher.hash(TEST_PASSWORD).unwrap();
    let user = user::Model::insert_if_email_unique(app_state.db(), name, &email, &hash, role)
        .await
        .unwrap()
        .expect("seeded email should be unique");
    let token = app_state.tokens().sign(user.id).unwrap().token;
    (user, token)
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}
