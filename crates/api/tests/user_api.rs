mod common;

use axum::http::StatusCode;
use common::{body_json, get};

#[tokio::test]
async fn lists_seeded_users() {
    let app = common::build_test_app().await;
    let json = body_json(get(&app.router, "/api/v1/users").await).await;

    assert_eq!(json["data"].as_array().unwrap().len(), app.users.len());
}

#[tokio::test]
async fn fetches_one_user() {
    let app = common::build_test_app().await;
    let user = &app.users[1];

    let response = get(&app.router, &format!("/api/v1/users/{}", user.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], user.name);
}

#[tokio::test]
async fn unknown_user_is_404() {
    let app = common::build_test_app().await;
    let uri = format!("/api/v1/users/{}", assetdeck_core::types::new_id());

    assert_eq!(get(&app.router, &uri).await.status(), StatusCode::NOT_FOUND);
}
