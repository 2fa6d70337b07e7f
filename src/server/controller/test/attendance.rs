use super::*;

/// Tests correcting a record with a check-out before its check-in.
///
/// Expected: check-in 201, correction 422
#[tokio::test]
async fn check_out_before_check_in_is_unprocessable() {
    let (app, _db) = test_app().await;
    let cookie = register(&app, "ada@example.com").await;

    let (status, record, _) = send(
        &app,
        "POST",
        "/api/attendance/check_in",
        Some(&cookie),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = record["id"].as_i64().unwrap();

    let (status, body, _) = send(
        &app,
        "PUT",
        &format!("/api/attendance/{id}"),
        Some(&cookie),
        Some(json!({
            "check_in_at": "2025-03-03T10:00:00Z",
            "check_out_at": "2025-03-03T09:00:00Z",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], json!(false));
}

/// Expected: second check-in on the same day answers 422
#[tokio::test]
async fn second_check_in_is_unprocessable() {
    let (app, _db) = test_app().await;
    let cookie = register(&app, "ada@example.com").await;

    let (status, _, _) = send(
        &app,
        "POST",
        "/api/attendance/check_in",
        Some(&cookie),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _, _) = send(
        &app,
        "POST",
        "/api/attendance/check_in",
        Some(&cookie),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
