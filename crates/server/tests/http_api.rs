//! Router-level tests through `tower::ServiceExt::oneshot`

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use plan_assistant_config::Settings;
use plan_assistant_server::{create_router, AppState};

fn app() -> Router {
    create_router(AppState::new(Settings::default()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        },
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn new_session(app: &Router) -> String {
    let (status, body) = send(app, Method::POST, "/api/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["session_id"].as_str().unwrap().to_string()
}

async fn turn(app: &Router, id: &str, text: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        &format!("/api/sessions/{}/turns", id),
        Some(json!({ "text": text })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn test_create_session_returns_greeting() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/api/sessions", None).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["session_id"].is_string());
    assert_eq!(body["response"]["uiHint"], "idle");
    assert!(body["response"]["text"].as_str().unwrap().starts_with("Hi there!"));
}

#[tokio::test]
async fn test_loan_over_http() {
    let app = app();
    let id = new_session(&app).await;

    let body = turn(&app, &id, "I need a loan").await;
    assert_eq!(body["uiHint"], "awaiting_input");

    let body = turn(&app, &id, "50001").await;
    assert_eq!(body["errorKind"], "over_max");

    turn(&app, &id, "5000").await;
    turn(&app, &id, "5").await;
    let body = turn(&app, &id, "yes").await;
    assert_eq!(body["uiHint"], "confirmation_required");
    assert_eq!(body["requiresConfirmation"], true);
    assert_eq!(body["confirmationPhrase"], "yes, submit loan");

    let body = turn(&app, &id, "submit").await;
    assert_eq!(body["errorKind"], "invalid_confirmation_phrase");

    let body = turn(&app, &id, "yes, submit loan").await;
    assert_eq!(body["uiHint"], "completed");

    let (status, state) = send(&app, Method::GET, &format!("/api/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["phase"], "completed");
    assert_eq!(state["collected_data"]["loan_amount"], 5000.0);
}

#[tokio::test]
async fn test_back_cancel_and_reset_endpoints() {
    let app = app();
    let id = new_session(&app).await;
    turn(&app, &id, "take a loan").await;
    turn(&app, &id, "5000").await;

    let (status, body) = send(&app, Method::POST, &format!("/api/sessions/{}/back", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["uiHint"], "awaiting_input");
    let (_, state) = send(&app, Method::GET, &format!("/api/sessions/{}", id), None).await;
    assert_eq!(state["active_step"]["step"], "amount");

    let (status, body) =
        send(&app, Method::POST, &format!("/api/sessions/{}/cancel", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["uiHint"], "idle");

    turn(&app, &id, "enroll me").await;
    let (status, _) = send(&app, Method::POST, &format!("/api/sessions/{}/reset", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, state) = send(&app, Method::GET, &format!("/api/sessions/{}", id), None).await;
    assert_eq!(state["phase"], "idle");
    assert!(state["active_task"].is_null());
}

#[tokio::test]
async fn test_sessions_do_not_share_state() {
    let app = app();
    let a = new_session(&app).await;
    let b = new_session(&app).await;

    turn(&app, &a, "take a loan").await;

    let (_, state_a) = send(&app, Method::GET, &format!("/api/sessions/{}", a), None).await;
    let (_, state_b) = send(&app, Method::GET, &format!("/api/sessions/{}", b), None).await;
    assert_eq!(state_a["active_task"], "loan");
    assert_eq!(state_b["phase"], "idle");

    let (_, listing) = send(&app, Method::GET, "/api/sessions", None).await;
    assert_eq!(listing["count"], 2);
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sessions/missing/turns",
        Some(json!({ "text": "hello" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("missing"));

    let (status, _) = send(&app, Method::DELETE, "/api/sessions/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_session() {
    let app = app();
    let id = new_session(&app).await;

    let (status, _) = send(&app, Method::DELETE, &format!("/api/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &format!("/api/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_oversized_turn_rejected() {
    let app = app();
    let id = new_session(&app).await;

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/sessions/{}/turns", id),
        Some(json!({ "text": "a".repeat(2_001) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_capacity_limit() {
    let mut settings = Settings::default();
    settings.server.max_sessions = 1;
    let app = create_router(AppState::new(settings));

    new_session(&app).await;
    let (status, _) = send(&app, Method::POST, "/api/sessions", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_health_and_disabled_metrics() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["sessions"], 0);

    // No handle attached
    let (status, _) = send(&app, Method::GET, "/metrics", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
