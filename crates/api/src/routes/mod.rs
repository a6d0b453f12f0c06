pub mod assets;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /assets                                   list, ingest
/// /assets/favorite                          queue a favorite (POST)
///
/// /users                                    list
/// /users/{user_id}                          get
/// /users/{user_id}/favorites                list favorites
/// /users/{user_id}/favorites/{favorite_id}  update (PATCH), delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/assets", assets::router())
        .nest("/users", users::router())
}
