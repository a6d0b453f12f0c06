//! HTTP tests for listing and ingesting assets.

mod common;

use assetdeck_core::asset::Asset;
use assetdeck_core::store::AssetStore;
use axum::http::StatusCode;
use common::{body_json, get, post_json};
use serde_json::json;

fn chart_body() -> serde_json::Value {
    json!({
        "type": "CHART",
        "data": {
            "title": "Weekly signups",
            "x_axis": "week",
            "y_axis": "signups",
            "data": [12.0, 18.5, 21.0]
        }
    })
}

#[tokio::test]
async fn empty_store_lists_nothing() {
    let app = common::build_test_app().await;
    let json = body_json(get(&app.router, "/api/v1/assets").await).await;

    assert_eq!(json["data"], json!([]));
    assert!(json["next_page_token"].is_null());
}

#[tokio::test]
async fn created_asset_is_listed_with_its_tag() {
    let app = common::build_test_app().await;

    let response = post_json(&app.router, "/api/v1/assets", chart_body()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["type"], "CHART");
    assert_eq!(created["data"]["data"]["title"], "Weekly signups");

    let listed = body_json(get(&app.router, "/api/v1/assets").await).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
    assert_eq!(listed["data"][0]["id"], created["data"]["id"]);
    assert_eq!(listed["next_page_token"], created["data"]["id"]);
}

#[tokio::test]
async fn unknown_asset_type_is_rejected() {
    let app = common::build_test_app().await;
    let body = json!({ "type": "MAP", "data": {} });

    let response = post_json(&app.router, "/api/v1/assets", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "UNSUPPORTED_VARIANT");
}

#[tokio::test]
async fn out_of_range_audience_is_rejected() {
    let app = common::build_test_app().await;
    let body = json!({
        "type": "AUDIENCE",
        "data": {
            "gender": "male",
            "birth_country": "Spain",
            "age_min": 60,
            "age_max": 20,
            "social_media_hours": 2,
            "last_month_purchases": 1
        }
    });

    let response = post_json(&app.router, "/api/v1/assets", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn pages_follow_the_token() {
    let app = common::build_test_app().await;
    let assets = vec![
        Asset::chart("a", "x", "y", vec![1.0]),
        Asset::insight("b"),
        Asset::insight("c"),
    ];
    for asset in &assets {
        app.store.store_asset(asset).await.unwrap();
    }

    let first = body_json(get(&app.router, "/api/v1/assets?page_size=2").await).await;
    assert_eq!(first["data"].as_array().unwrap().len(), 2);
    let token = first["next_page_token"].as_str().unwrap().to_string();
    assert_eq!(token, assets[1].id().to_string());

    let uri = format!("/api/v1/assets?page_size=2&page_token={token}");
    let second = body_json(get(&app.router, &uri).await).await;
    assert_eq!(second["data"].as_array().unwrap().len(), 1);
    assert_eq!(second["data"][0]["id"], assets[2].id().to_string());
}

#[tokio::test]
async fn malformed_page_token_is_a_bad_request() {
    let app = common::build_test_app().await;
    let response = get(&app.router, "/api/v1/assets?page_token=nope").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn non_numeric_page_size_is_a_bad_request() {
    let app = common::build_test_app().await;
    let response = get(&app.router, "/api/v1/assets?page_size=ten").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
