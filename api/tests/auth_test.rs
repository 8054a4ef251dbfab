mod helpers;

use axum::http::StatusCode;
use db::models::user::Role;
use helpers::{body_json, make_test_app, request, seed_user};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn health_is_public() {
    let (app, _) = make_test_app().await;

    let response = app.oneshot(request("GET", "/api/health", None, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"], "OK");
}

#[tokio::test]
async fn register_returns_token_and_plain_user() {
    let (app, _) = make_test_app().await;

    let body = json!({
        "name": "Ann",
        "email": "Ann@Example.com",
        "password": "secret1",
        "role": "admin"
    });
    let response = app
        .oneshot(request("POST", "/api/auth/register", None, Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["user"]["email"], "ann@example.com");
    assert_eq!(json["data"]["user"]["role"], "user");
    assert!(json["data"]["user"].get("password_hash").is_none());
    assert!(json["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(json["data"]["expires_at"].as_str().is_some());
}

#[tokio::test]
async fn register_duplicate_email_is_rejected() {
    let (app, _) = make_test_app().await;
    let body = json!({ "name": "Ann", "email": "a@b.com", "password": "secret1" });

    let first = app
        .clone()
        .oneshot(request("POST", "/api/auth/register", None, Some(body.clone())))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(request("POST", "/api/auth/register", None, Some(body)))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let json = body_json(second).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Email already registered");
}

#[tokio::test]
async fn register_validation_messages() {
    let (app, _) = make_test_app().await;
    let body = json!({ "name": "Ann", "email": "nope", "password": "123" });

    let response = app
        .oneshot(request("POST", "/api/auth/register", None, Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(
        json["message"],
        "Invalid email format; Password must be at least 6 characters"
    );
}

#[tokio::test]
async fn register_accepts_padded_mixed_case_email() {
    let (app, _) = make_test_app().await;
    let body = json!({ "name": "Ann", "email": "  Ann@B.com ", "password": "secret1" });

    let response = app
        .clone()
        .oneshot(request("POST", "/api/auth/register", None, Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["user"]["email"], "ann@b.com");

    let login = json!({ "email": "ANN@b.com", "password": "secret1" });
    let response = app
        .oneshot(request("POST", "/api/auth/login", None, Some(login)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_success_and_generic_failure() {
    let (app, app_state) = make_test_app().await;
    let (user, _) = seed_user(&app_state, "Ann", Role::User).await;

    let ok = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": user.email, "password": helpers::app::TEST_PASSWORD })),
        ))
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    let json = body_json(ok).await;
    assert_eq!(json["data"]["user"]["id"], user.id);

    for (email, password) in [("ann@test.com", "wrong-pass"), ("ghost@test.com", "password123")] {
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "email": email, "password": password })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Invalid email or password");
    }
}

#[tokio::test]
async fn me_requires_a_valid_token() {
    let (app, app_state) = make_test_app().await;
    let (user, token) = seed_user(&app_state, "Ann", Role::Agent).await;

    let ok = app
        .clone()
        .oneshot(request("GET", "/api/auth/me", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    let json = body_json(ok).await;
    assert_eq!(json["data"]["id"], user.id);
    assert_eq!(json["data"]["role"], "agent");

    let missing = app
        .clone()
        .oneshot(request("GET", "/api/auth/me", None, None))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(missing).await["message"], "Not authorized, no token");

    let garbage = app
        .oneshot(request("GET", "/api/auth/me", Some("not.a.jwt"), None))
        .await
        .unwrap();
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(garbage).await["message"], "Token is invalid or expired");
}

#[tokio::test]
async fn token_for_missing_account_is_rejected() {
    let (app, app_state) = make_test_app().await;
    let token = app_state.tokens().sign(424242).unwrap().token;

    let response = app
        .oneshot(request("GET", "/api/auth/me", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
