//! All routes are mounted under `/assets`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{assets, favorites};
use crate::state::AppState;

/// ```text
/// GET    /           -> list_assets
/// POST   /           -> create_asset
/// POST   /favorite   -> favorite_asset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(assets::list_assets).post(assets::create_asset))
        .route("/favorite", post(favorites::favorite_asset))
}
