use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
    response::Response,
};
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

async fn test_app(tag: &str) -> (Router, PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "lacquer-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", temp_path.display());
    let storage = lacquer::db::BookingStorage::connect(&database_url)
        .await
        .expect("failed to open test database");
    storage.init_schema().await.expect("failed to init schema");
    storage.seed_catalog().await.expect("failed to seed catalog");

    let state = lacquer::router::LacquerState::new(storage);
    (lacquer::router::lacquer_router(state), temp_path)
}

fn booking_payload(date: &str, time: &str) -> String {
    serde_json::json!({
        "clientName": "Ana Torres",
        "clientEmail": "ana@example.com",
        "clientPhone": "555-0101",
        "serviceId": 1,
        "subServiceId": 1,
        "date": date,
        "time": time,
    })
    .to_string()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<String>) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map(Body::from).unwrap_or_else(Body::empty))
        .expect("failed to build request");
    app.clone().oneshot(request).await.expect("request failed")
}

async fn json_body(resp: Response) -> serde_json::Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body was not JSON")
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let (app, temp_path) = test_app("health").await;

    let resp = send(&app, "GET", "/health", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["status"], "ok");

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn catalog_is_seeded_with_nested_sub_services() {
    let (app, temp_path) = test_app("catalog").await;

    let resp = send(&app, "GET", "/api/services", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;

    let services = body.as_array().expect("services response was not an array");
    assert_eq!(services.len(), 2);
    for service in services {
        let subs = service["sub_services"]
            .as_array()
            .expect("sub_services missing");
        assert!(!subs.is_empty());
    }

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn booking_same_slot_twice_yields_one_success_and_one_rejection() {
    let (app, temp_path) = test_app("double-booking").await;

    let first = send(
        &app,
        "POST",
        "/api/appointments",
        Some(booking_payload("2026-03-11", "10:00")),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let body = json_body(first).await;
    assert_eq!(body["appointment"]["status"], "confirmed");

    let second = send(
        &app,
        "POST",
        "/api/appointments",
        Some(booking_payload("2026-03-11", "10:00")),
    )
    .await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body = json_body(second).await;
    assert_eq!(body["error"]["code"], "SLOT_TAKEN");

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn blank_client_name_is_rejected() {
    let (app, temp_path) = test_app("blank-name").await;

    let payload = serde_json::json!({
        "clientName": "   ",
        "serviceId": 1,
        "subServiceId": 1,
        "date": "2026-03-11",
        "time": "10:00",
    })
    .to_string();
    let resp = send(&app, "POST", "/api/appointments", Some(payload)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["error"]["code"], "MISSING_FIELD");

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn booked_appointment_appears_in_day_and_week_listings() {
    let (app, temp_path) = test_app("listings").await;

    let created = send(
        &app,
        "POST",
        "/api/appointments",
        Some(booking_payload("2026-03-11", "14:00")),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let day = json_body(send(&app, "GET", "/api/appointments/day/2026-03-11", None).await).await;
    let day = day.as_array().expect("day response was not an array");
    assert_eq!(day.len(), 1);
    assert_eq!(day[0]["client_name"], "Ana Torres");
    assert_eq!(day[0]["service_name"], "Makeup");

    // 2026-03-11 is a Wednesday; its week starts on the 9th.
    let week = json_body(send(&app, "GET", "/api/appointments/week/2026-03-09", None).await).await;
    let week = week.as_array().expect("week response was not an array");
    assert_eq!(week.len(), 1);
    assert_eq!(week[0]["time"], "14:00");

    let next_week =
        json_body(send(&app, "GET", "/api/appointments/week/2026-03-16", None).await).await;
    assert_eq!(next_week.as_array().map(Vec::len), Some(0));

    let all = json_body(send(&app, "GET", "/api/appointments", None).await).await;
    assert_eq!(all.as_array().map(Vec::len), Some(1));

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn cancelling_missing_appointment_returns_404() {
    let (app, temp_path) = test_app("cancel-missing").await;

    let resp = send(&app, "PATCH", "/api/appointments/9999/cancel", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&app, "DELETE", "/api/appointments/9999", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn deleting_frees_the_slot_but_cancelling_does_not() {
    let (app, temp_path) = test_app("slot-lifecycle").await;

    let created = send(
        &app,
        "POST",
        "/api/appointments",
        Some(booking_payload("2026-03-12", "11:00")),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let body = json_body(created).await;
    let id = body["appointment"]["id"].as_i64().expect("missing id");

    let check_uri = "/api/appointments/check?date=2026-03-12&time=11:00";
    let availability = json_body(send(&app, "GET", check_uri, None).await).await;
    assert_eq!(availability["available"], false);

    let cancelled = send(
        &app,
        "PATCH",
        &format!("/api/appointments/{id}/cancel"),
        None,
    )
    .await;
    assert_eq!(cancelled.status(), StatusCode::OK);
    let cancelled = json_body(cancelled).await;
    assert_eq!(cancelled["status"], "cancelled");

    // Soft cancel keeps the row, so the slot stays occupied.
    let availability = json_body(send(&app, "GET", check_uri, None).await).await;
    assert_eq!(availability["available"], false);

    let deleted = send(&app, "DELETE", &format!("/api/appointments/{id}"), None).await;
    assert_eq!(deleted.status(), StatusCode::OK);

    let availability = json_body(send(&app, "GET", check_uri, None).await).await;
    assert_eq!(availability["available"], true);

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn rebooking_by_email_reuses_the_client_row() {
    let (app, temp_path) = test_app("client-upsert").await;

    let first = send(
        &app,
        "POST",
        "/api/appointments",
        Some(booking_payload("2026-03-11", "10:00")),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let first = json_body(first).await;

    let payload = serde_json::json!({
        "clientName": "Ana T. Torres",
        "clientEmail": "ana@example.com",
        "serviceId": 2,
        "subServiceId": 4,
        "date": "2026-03-13",
        "time": "15:00",
    })
    .to_string();
    let second = send(&app, "POST", "/api/appointments", Some(payload)).await;
    assert_eq!(second.status(), StatusCode::CREATED);
    let second = json_body(second).await;

    assert_eq!(
        first["appointment"]["client_id"],
        second["appointment"]["client_id"]
    );

    // The upsert overwrote the name but kept the phone from the first booking.
    let day = json_body(send(&app, "GET", "/api/appointments/day/2026-03-13", None).await).await;
    assert_eq!(day[0]["client_name"], "Ana T. Torres");
    assert_eq!(day[0]["client_phone"], "555-0101");

    let _ = fs::remove_file(&temp_path);
}
