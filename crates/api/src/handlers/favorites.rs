//! Handlers for user favorites.
//!
//! Creating a favorite is answered with `202 Accepted` as soon as the write
//! is queued; the rest are synchronous.

use assetdeck_core::favorite::{FavoriteAssetParams, UpdateFavoriteParams};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::{JsonBody, PathParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/assets/favorite
pub async fn favorite_asset(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<FavoriteAssetParams>,
) -> AppResult<StatusCode> {
    input.validate()?;
    state.favorites.favorite_asset(input).await?;
    Ok(StatusCode::ACCEPTED)
}

/// GET /api/v1/users/{user_id}/favorites
pub async fn list_favorites(
    State(state): State<AppState>,
    PathParams(user_id): PathParams<Uuid>,
) -> AppResult<impl IntoResponse> {
    let favorites = state.favorites.fetch_user_favorites(user_id).await?;
    Ok(Json(DataResponse { data: favorites }))
}

/// PATCH /api/v1/users/{user_id}/favorites/{favorite_id}
pub async fn update_favorite(
    State(state): State<AppState>,
    PathParams((user_id, favorite_id)): PathParams<(Uuid, Uuid)>,
    JsonBody(input): JsonBody<UpdateFavoriteParams>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let favorite = state
        .favorites
        .update_favorite(favorite_id, user_id, input)
        .await?;
    Ok(Json(DataResponse { data: favorite }))
}

/// DELETE /api/v1/users/{user_id}/favorites/{favorite_id}
pub async fn delete_favorite(
    State(state): State<AppState>,
    PathParams((user_id, favorite_id)): PathParams<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    state
        .favorites
        .delete_favorite(favorite_id, user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
