mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{MockSender, TestApp};

fn booking_body() -> serde_json::Value {
    json!({
        "name": "Budi Santoso",
        "phone_number": "08123456789",
        "started_at": "2024-05-10",
        "office_space_id": 1,
        "total_amount": 3_500_000
    })
}

#[tokio::test]
async fn test_create_booking_derives_end_date_and_code() {
    let app = TestApp::new();

    let (status, body) = app.post("/booking-transaction", booking_body()).await;

    assert_eq!(status, StatusCode::CREATED);
    let data = &body["data"];
    assert_eq!(data["name"], "Budi Santoso");
    assert_eq!(data["started_at"], "2024-05-10");
    assert_eq!(data["ended_at"], "2024-06-09");
    assert_eq!(data["duration"], 30);
    assert_eq!(data["is_paid"], false);
    assert_eq!(data["office"]["slug"], "sudirman-hub");
    assert!(data["office"].get("city").is_none());

    let code = data["booking_trx_id"].as_str().unwrap();
    assert!(office_booking::domain::trx_code::is_well_formed(code), "bad code {}", code);
    assert_eq!(app.bookings.count().await, 1);
}

#[tokio::test]
async fn test_create_booking_sends_sms_confirmation() {
    let app = TestApp::new();

    let (status, body) = app.post("/booking-transaction", booking_body()).await;
    assert_eq!(status, StatusCode::CREATED);

    let sent = app.sender.sent().await;
    assert_eq!(sent.len(), 1);
    assert!(!sent[0].to.starts_with("whatsapp:"));
    assert!(sent[0].body.contains("Sudirman Hub"));
    assert!(sent[0]
        .body
        .contains(body["data"]["booking_trx_id"].as_str().unwrap()));
}

#[tokio::test]
async fn test_create_booking_unknown_office_returns_404() {
    let app = TestApp::new();
    let mut body = booking_body();
    body["office_space_id"] = json!(999);

    let (status, _) = app.post("/booking-transaction", body).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.bookings.count().await, 0);
    assert!(app.sender.sent().await.is_empty());
}

#[tokio::test]
async fn test_create_booking_empty_name_returns_422() {
    let app = TestApp::new();
    let mut body = booking_body();
    body["name"] = json!("");

    let (status, body) = app.post("/booking-transaction", body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["name"][0], "The name field is required.");
    assert_eq!(app.bookings.count().await, 0);
}

#[tokio::test]
async fn test_create_booking_reports_every_missing_field() {
    let app = TestApp::new();

    let (status, body) = app.post("/booking-transaction", json!({})).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    for field in ["name", "phone_number", "started_at", "office_space_id", "total_amount"] {
        assert!(body["errors"].get(field).is_some(), "missing error for {}", field);
    }
}

#[tokio::test]
async fn test_malformed_json_is_a_validation_error() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/booking-transaction", json!({"name": 42, "office_space_id": "one"}))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"].get("body").is_some());
}

#[tokio::test]
async fn test_provider_outage_does_not_fail_booking() {
    let app = TestApp::with_sender(MockSender::failing());

    let (status, _) = app.post("/booking-transaction", booking_body()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(app.bookings.count().await, 1);
    assert_eq!(app.sender.sent().await.len(), 1);
}

#[tokio::test]
async fn test_missing_credentials_skip_notification() {
    let app = TestApp::without_messaging();

    let (status, _) = app.post("/booking-transaction", booking_body()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(app.bookings.count().await, 1);
}

#[tokio::test]
async fn test_booking_details_requires_matching_phone_and_code() {
    let app = TestApp::new();
    app.seed_booking("TRX-ABC123", "08123456789", 2).await;

    let (status, body) = app
        .post(
            "/booking-details",
            json!({"phone_number": "08123456789", "booking_trx_id": "TRX-ABC123"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["booking_trx_id"], "TRX-ABC123");
    assert_eq!(body["data"]["office"]["name"], "Braga Works");
    assert_eq!(body["data"]["office"]["city"]["name"], "Bandung");

    let (status, _) = app
        .post(
            "/booking-details",
            json!({"phone_number": "08999999999", "booking_trx_id": "TRX-ABC123"}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .post(
            "/booking-details",
            json!({"phone_number": "08123456789", "booking_trx_id": "TRX-ZZZ999"}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_booking_details_missing_fields_returns_422() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/booking-details", json!({"phone_number": "08123456789"}))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"].get("booking_trx_id").is_some());
}

#[tokio::test]
async fn test_office_catalog() {
    let app = TestApp::new();

    let (status, body) = app.request("GET", "/offices", None, false).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, body) = app.request("GET", "/office/braga-works", None, false).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["city"]["slug"], "bandung");
    assert_eq!(body["data"]["duration"], 10);

    let (status, _) = app.request("GET", "/office/nowhere", None, false).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_reports_messaging_state() {
    let app = TestApp::without_messaging();

    let (status, body) = app.request("GET", "/health", None, false).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["messaging"], "disabled");
}

#[tokio::test]
async fn test_booking_details_for_booking_without_office() {
    let app = TestApp::new();
    app.seed_orphan_booking("TRX-ORPH02", "08123456789").await;

    let (status, body) = app
        .post(
            "/booking-details",
            json!({"phone_number": "08123456789", "booking_trx_id": "TRX-ORPH02"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["booking_trx_id"], "TRX-ORPH02");
    assert!(body["data"].get("office").is_none());
}

#[tokio::test]
async fn test_large_valid_booking_is_accepted_with_body_logging() {
    // TestApp logs request bodies.
    let app = TestApp::new();
    let mut body = booking_body();
    body["name"] = json!("字".repeat(255));
    body["phone_number"] = json!("8".repeat(255));
    assert!(body.to_string().len() > 1024);

    let (status, response) = app.post("/booking-transaction", body).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response["data"]["name"], "字".repeat(255));
    assert_eq!(app.bookings.count().await, 1);
}
