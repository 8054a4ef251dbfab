mod helpers;

use axum::{Router, http::StatusCode};
use db::models::user::Role;
use helpers::{body_json, make_test_app, request, seed_user};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn call(app: &Router, method: &str, uri: &str, token: &str, body: Option<Value>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request(method, uri, Some(token), body))
        .await
        .unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

fn printer() -> Value {
    json!({
        "title": "Printer broken",
        "description": "Paper jam on floor 3",
        "category": "technical",
        "priority": "high"
    })
}

#[tokio::test]
async fn printer_broken_flow() {
    let (app, app_state) = make_test_app().await;
    let (_, user) = seed_user(&app_state, "Uma", Role::User).await;
    let (_, admin) = seed_user(&app_state, "Max", Role::Admin).await;
    let (gail, gail_token) = seed_user(&app_state, "Gail", Role::Agent).await;
    let (_, hank_token) = seed_user(&app_state, "Hank", Role::Agent).await;

    let (status, json) = call(&app, "POST", "/api/tickets", &user, Some(printer())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["status"], "open");
    assert!(json["data"]["assigned_to"].is_null());
    assert_eq!(json["data"]["category"], "technical");
    let uri = format!("/api/tickets/{}", json["data"]["id"]);

    let (status, json) = call(&app, "PUT", &uri, &admin, Some(json!({ "assigned_to": gail.id }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["assigned_to"]["id"], gail.id);
    assert_eq!(json["data"]["status"], "open");

    let (status, json) =
        call(&app, "PUT", &uri, &gail_token, Some(json!({ "status": "in-progress" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "in-progress");

    let (status, json) =
        call(&app, "PUT", &uri, &hank_token, Some(json!({ "status": "resolved" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["success"], false);

    let (_, json) = call(&app, "GET", &uri, &admin, None).await;
    assert_eq!(json["data"]["status"], "in-progress");
}

#[tokio::test]
async fn update_rules_reject_whole_request() {
    let (app, app_state) = make_test_app().await;
    let (_, user) = seed_user(&app_state, "Uma", Role::User).await;
    let (_, admin) = seed_user(&app_state, "Max", Role::Admin).await;
    let (gail, gail_token) = seed_user(&app_state, "Gail", Role::Agent).await;

    let (_, json) = call(&app, "POST", "/api/tickets", &user, Some(printer())).await;
    let uri = format!("/api/tickets/{}", json["data"]["id"]);
    call(&app, "PUT", &uri, &admin, Some(json!({ "assignedTo": gail.id }))).await;

    let rejected = [
        (&user, json!({ "status": "closed" })),
        (&admin, json!({ "status": "closed" })),
        (&admin, json!({ "status": "closed", "assigned_to": gail.id })),
        (&gail_token, json!({ "status": "resolved", "assigned_to": gail.id })),
    ];
    for (token, body) in rejected {
        let (status, _) = call(&app, "PUT", &uri, token, Some(body)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    let (_, json) = call(&app, "GET", &uri, &admin, None).await;
    assert_eq!(json["data"]["status"], "open");
    assert_eq!(json["data"]["assigned_to"]["id"], gail.id);
}

#[tokio::test]
async fn admin_can_only_assign_agents() {
    let (app, app_state) = make_test_app().await;
    let (uma, user) = seed_user(&app_state, "Uma", Role::User).await;
    let (_, admin) = seed_user(&app_state, "Max", Role::Admin).await;

    let (_, json) = call(&app, "POST", "/api/tickets", &user, Some(printer())).await;
    let uri = format!("/api/tickets/{}", json["data"]["id"]);

    let (status, json) = call(&app, "PUT", &uri, &admin, Some(json!({ "assigned_to": uma.id }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Assignee must be an agent");

    let (status, _) = call(&app, "PUT", &uri, &admin, Some(json!({ "assigned_to": 9999 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_is_scoped_and_newest_first() {
    let (app, app_state) = make_test_app().await;
    let (_, uma) = seed_user(&app_state, "Uma", Role::User).await;
    let (_, vic) = seed_user(&app_state, "Vic", Role::User).await;
    let (_, agent) = seed_user(&app_state, "Gail", Role::Agent).await;

    for (token, title) in [(&uma, "first"), (&vic, "second"), (&uma, "third")] {
        let body = json!({ "title": title, "description": "details" });
        let (status, _) = call(&app, "POST", "/api/tickets", token, Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let titles = |json: &Value| -> Vec<String> {
        json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["title"].as_str().unwrap().to_string())
            .collect()
    };

    let (_, json) = call(&app, "GET", "/api/tickets", &uma, None).await;
    assert_eq!(titles(&json), vec!["third", "first"]);

    let (_, json) = call(&app, "GET", "/api/tickets", &agent, None).await;
    assert_eq!(titles(&json), vec!["third", "second", "first"]);
    assert_eq!(json["data"][0]["category"], "general");
    assert_eq!(json["data"][0]["priority"], "medium");
}

#[tokio::test]
async fn ticket_detail_of_other_user_is_forbidden() {
    let (app, app_state) = make_test_app().await;
    let (_, uma) = seed_user(&app_state, "Uma", Role::User).await;
    let (_, vic) = seed_user(&app_state, "Vic", Role::User).await;

    let (_, json) = call(&app, "POST", "/api/tickets", &uma, Some(printer())).await;
    let uri = format!("/api/tickets/{}", json["data"]["id"]);

    let (status, json) = call(&app, "GET", &uri, &vic, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "Access denied");

    let (status, _) = call(&app, "GET", "/api/tickets/9999", &uma, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn comments_by_creator_and_staff() {
    let (app, app_state) = make_test_app().await;
    let (uma, uma_token) = seed_user(&app_state, "Uma", Role::User).await;
    let (_, vic) = seed_user(&app_state, "Vic", Role::User).await;
    let (_, agent) = seed_user(&app_state, "Hank", Role::Agent).await;

    let (_, json) = call(&app, "POST", "/api/tickets", &uma_token, Some(printer())).await;
    let uri = format!("/api/tickets/{}/comment", json["data"]["id"]);

    let (status, json) = call(&app, "POST", &uri, &uma_token, Some(json!({ "text": "Any news?" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["comments"][0]["text"], "Any news?");
    assert_eq!(json["data"]["comments"][0]["user"]["id"], uma.id);
    assert_eq!(json["data"]["comments"][0]["user"]["role"], "user");

    let (status, json) = call(&app, "POST", &uri, &agent, Some(json!({ "text": "On it" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["comments"].as_array().unwrap().len(), 2);

    let (status, _) = call(&app, "POST", &uri, &vic, Some(json!({ "text": "Me too" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call(&app, "POST", &uri, &uma_token, Some(json!({ "text": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_requires_admin_before_existence() {
    let (app, app_state) = make_test_app().await;
    let (_, user) = seed_user(&app_state, "Uma", Role::User).await;
    let (_, agent) = seed_user(&app_state, "Gail", Role::Agent).await;
    let (_, admin) = seed_user(&app_state, "Max", Role::Admin).await;

    let (_, json) = call(&app, "POST", "/api/tickets", &user, Some(printer())).await;
    let uri = format!("/api/tickets/{}", json["data"]["id"]);

    for token in [&user, &agent] {
        let (status, _) = call(&app, "DELETE", &uri, token, None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
    let (status, _) = call(&app, "DELETE", "/api/tickets/9999", &agent, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call(&app, "DELETE", &uri, &admin, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&app, "GET", &uri, &admin, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, "DELETE", &uri, &admin, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tickets_require_authentication() {
    let (app, _) = make_test_app().await;

    let response = app
        .oneshot(request("GET", "/api/tickets", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn long_title_is_kept_as_submitted() {
    let (app, app_state) = make_test_app().await;
    let (_, user) = seed_user(&app_state, "Uma", Role::User).await;

    let title = "x".repeat(201);
    let body = json!({ "title": title, "description": "d" });
    let (status, json) = call(&app, "POST", "/api/tickets", &user, Some(body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["title"].as_str().map(str::len), Some(201));
}

#[tokio::test]
async fn malformed_bodies_get_the_error_envelope() {
    let (app, app_state) = make_test_app().await;
    let (_, user) = seed_user(&app_state, "Uma", Role::User).await;
    let (_, admin) = seed_user(&app_state, "Max", Role::Admin).await;

    let (_, json) = call(&app, "POST", "/api/tickets", &user, Some(printer())).await;
    let uri = format!("/api/tickets/{}", json["data"]["id"]);

    let bad = [
        ("PUT", uri.clone(), &admin, json!({ "status": "bogus" })),
        ("PUT", uri.clone(), &admin, json!({ "assigned_to": "gail" })),
        (
            "POST",
            "/api/tickets".to_string(),
            &user,
            json!({ "title": "t", "description": "d", "category": "plumbing" }),
        ),
        ("POST", format!("{}/comment", uri), &user, json!({ "body": "hi" })),
    ];
    for (method, uri, token, body) in bad {
        let (status, json) = call(&app, method, &uri, token, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
        assert_eq!(json["success"], false);
        assert!(json["data"].is_null());
        assert!(json["message"].as_str().is_some_and(|m| !m.is_empty()));
    }

    let (_, json) = call(&app, "GET", &uri, &admin, None).await;
    assert_eq!(json["data"]["status"], "open");
}

#[tokio::test]
async fn missing_ticket_error_has_null_data() {
    let (app, app_state) = make_test_app().await;
    let (_, admin) = seed_user(&app_state, "Max", Role::Admin).await;

    let (status, json) = call(&app, "GET", "/api/tickets/31337", &admin, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert!(json["data"].is_null());
    assert_eq!(json["message"], "Ticket not found");
}
