//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{body_json, get};

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let app = common::build_test_app().await;
    let response = get(&app.router, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["storage_healthy"], true);
    assert_eq!(json["favorites"]["state"], "running");
    assert_eq!(json["favorites"]["submitted"], 0);
}

#[tokio::test]
async fn unreachable_database_reports_degraded() {
    let app = common::build_test_app_with_health(false).await;
    let json = body_json(get(&app.router, "/health").await).await;

    assert_eq!(json["status"], "degraded");
    assert_eq!(json["storage_healthy"], false);
}

#[tokio::test]
async fn stopped_favorite_pool_reports_degraded() {
    let app = common::build_test_app().await;
    app.state
        .favorites
        .shutdown(Duration::from_secs(5))
        .await
        .unwrap();

    let json = body_json(get(&app.router, "/health").await).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["storage_healthy"], true);
    assert_eq!(json["favorites"]["state"], "stopped");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app().await;
    let response = get(&app.router, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = common::build_test_app().await;
    let response = get(&app.router, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}
