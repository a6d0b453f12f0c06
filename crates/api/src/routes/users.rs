//! All routes are mounted under `/users`.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{favorites, users};
use crate::state::AppState;

/// ```text
/// GET    /                                 -> list_users
/// GET    /{user_id}                        -> get_user
/// GET    /{user_id}/favorites              -> list_favorites
/// PATCH  /{user_id}/favorites/{favorite_id} -> update_favorite
/// DELETE /{user_id}/favorites/{favorite_id} -> delete_favorite
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users))
        .route("/{user_id}", get(users::get_user))
        .route("/{user_id}/favorites", get(favorites::list_favorites))
        .route(
            "/{user_id}/favorites/{favorite_id}",
            patch(favorites::update_favorite).delete(favorites::delete_favorite),
        )
}
