use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

use crate::error::AppResult;
use crate::extract::PathParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users
pub async fn list_users(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let users = state.users.list_users().await?;
    Ok(Json(DataResponse { data: users }))
}

/// GET /api/v1/users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    PathParams(user_id): PathParams<Uuid>,
) -> AppResult<impl IntoResponse> {
    let user = state.users.fetch_user(user_id).await?;
    Ok(Json(DataResponse { data: user }))
}
