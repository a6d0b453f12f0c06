//! Handlers for the unified asset stream.

use assetdeck_core::asset::{Asset, AssetDraft};
use assetdeck_core::pagination::PageRequest;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::extract::{JsonBody, QueryParams};
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// GET /api/v1/assets?page_size=&page_token=
///
/// One page of assets of every kind, ordered by id.
pub async fn list_assets(
    State(state): State<AppState>,
    QueryParams(request): QueryParams<PageRequest>,
) -> AppResult<impl IntoResponse> {
    let page = state.assets.list_assets(&request).await?;

    Ok(Json(PageResponse::<Asset> {
        data: page.items,
        next_page_token: page.next_page_token,
    }))
}

/// POST /api/v1/assets
///
/// Ingest one asset from a `{ "type": ..., "data": ... }` body.
pub async fn create_asset(
    State(state): State<AppState>,
    JsonBody(draft): JsonBody<AssetDraft>,
) -> AppResult<impl IntoResponse> {
    let asset = draft.into_asset()?;
    let asset = state.assets.store_asset(asset).await?;

    tracing::info!(asset_id = %asset.id(), kind = %asset.kind(), "Asset created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: asset })))
}
