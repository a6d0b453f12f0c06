#![allow(dead_code)]

use std::sync::Arc;

use assetdeck_api::config::ServerConfig;
use assetdeck_api::router::build_app_router;
use assetdeck_api::state::{AppState, HealthCheck};
use assetdeck_core::sampler::sample_users;
use assetdeck_core::user::User;
use assetdeck_db::MemoryStore;
use assetdeck_services::InMemoryUserDirectory;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults and no seeding.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        favorite_workers: 2,
        favorite_write_timeout_secs: 5,
        preloaded_assets: 0,
        preloaded_users: 0,
    }
}

pub struct StaticHealth(pub bool);

#[async_trait]
impl HealthCheck for StaticHealth {
    async fn is_healthy(&self) -> bool {
        self.0
    }
}

/// Everything a test needs to drive the app and inspect storage.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub users: Vec<User>,
}

/// Build the full application router over an in-memory store with a few
/// known users.
pub async fn build_test_app() -> TestApp {
    build_test_app_with_health(true).await
}

pub async fn build_test_app_with_health(healthy: bool) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let directory = Arc::new(InMemoryUserDirectory::new());
    let users = sample_users(3);
    directory.insert_users(users.clone()).await;

    let state = AppState::build(
        test_config(),
        store.clone(),
        directory,
        Arc::new(StaticHealth(healthy)),
    );

    TestApp {
        router: build_app_router(state.clone()),
        state,
        store,
        users,
    }
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn patch_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
