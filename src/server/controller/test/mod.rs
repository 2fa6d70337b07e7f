//! Router-level tests driving handlers through the full middleware stack.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::NaiveTime;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use test_utils::builder::TestBuilder;
use tower::ServiceExt;
use tower_sessions::SessionManagerLayer;

use crate::server::{
    model::attendance::AttendancePolicy, router::router, service::chat::hub::ChatHub,
    state::AppState, worker::read_receipt::ReadReceiptQueue,
};

mod attendance;

/// In-memory app with every table, sessions stored in the same database.
async fn test_app() -> (Router, DatabaseConnection) {
    let mut test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let store = test.session_store().await.unwrap();
    let db = test.db.clone().unwrap();

    let (queue, _rx) = ReadReceiptQueue::new();
    let policy = AttendancePolicy {
        work_day_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        standard_work_hours: 8.0,
    };

    let app = router()
        .with_state(AppState::new(db.clone(), ChatHub::new(), queue, policy))
        .layer(SessionManagerLayer::new(store).with_secure(false));

    (app, db)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value, Option<String>) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json, set_cookie)
}

/// Registers a user and returns the session cookie.
async fn register(app: &Router, email: &str) -> String {
    let (status, _, cookie) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "email": email,
            "name": "Test User",
            "password": "password123",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    cookie.expect("session cookie set on register")
}
