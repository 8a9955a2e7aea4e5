mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};

#[tokio::test]
async fn test_health_with_reachable_api() {
    let (_api, server) = common::setup().await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["invitation_api"]["status"], "ok");
    assert_eq!(
        json["checks"]["invitation_api"]["message"],
        "Event: Fernando y María"
    );
    assert!(json.get("version").is_some());
    assert!(json["checks"]["invitation_api"].get("error").is_none());
}

#[tokio::test]
async fn test_health_with_unreachable_api() {
    let base_url = common::unreachable_api().await;
    let state = common::create_test_state(&common::test_config(&base_url));
    let server = common::test_server(state);

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["invitation_api"]["status"], "error");
    assert_eq!(
        json["checks"]["invitation_api"]["error"]["code"],
        "upstream_unavailable"
    );
}

#[tokio::test]
async fn test_unreachable_api_on_code_lookup() {
    let base_url = common::unreachable_api().await;
    let state = common::create_test_state(&common::test_config(&base_url));
    let server = common::test_server(state);

    let response = server.post("/validar").form(&[("codigo", "FM2026-001")]).await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    assert!(response.text().contains("Sin conexión"));
}

#[tokio::test]
async fn test_countdown_after_start_sends_finished_event() {
    let (_api, server) =
        common::setup_with(common::default_guests(), Utc::now() - Duration::hours(1)).await;

    let response = server.get("/countdown").await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("finished"));
    assert!(body.contains("00:00:00:00"));
    assert!(!body.contains("tick"));
}

#[tokio::test]
async fn test_static_assets_are_served() {
    let (_api, server) = common::setup().await;

    let response = server.get("/static/style.css").await;

    response.assert_status_ok();
}
