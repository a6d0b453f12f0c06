//! Postgres implementation of the core storage traits.

use assetdeck_core::asset::Asset;
use assetdeck_core::error::CoreError;
use assetdeck_core::favorite::{FavoriteAsset, FavoriteAssetParams, UpdateFavoriteParams};
use assetdeck_core::pagination::AssetPage;
use assetdeck_core::store::{AssetStore, FavoriteStore};
use assetdeck_core::types::{self, AssetId, FavoriteId, UserId};
use async_trait::async_trait;

use crate::error::map_sqlx_error;
use crate::repositories::{AssetRepo, FavoriteRepo};
use crate::DbPool;

/// Asset and favorite storage backed by a shared connection pool.
///
/// Cheap to clone; all clones share the pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl AssetStore for PgStore {
    async fn store_asset(&self, asset: &Asset) -> Result<(), CoreError> {
        AssetRepo::insert(&self.pool, asset)
            .await
            .map_err(map_sqlx_error)
    }

    async fn list_assets(
        &self,
        cursor: Option<AssetId>,
        page_size: i64,
    ) -> Result<AssetPage, CoreError> {
        let rows = AssetRepo::list_after(&self.pool, cursor, page_size)
            .await
            .map_err(map_sqlx_error)?;

        // One bad row aborts the page: skipping it would hand out a cursor
        // that silently jumps over data.
        let items = rows
            .into_iter()
            .map(Asset::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AssetPage::from_items(items))
    }
}

#[async_trait]
impl FavoriteStore for PgStore {
    async fn store_favorite(
        &self,
        params: &FavoriteAssetParams,
    ) -> Result<FavoriteAsset, CoreError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let kind = AssetRepo::resolve_kind(&mut *tx, params.asset_id)
            .await
            .map_err(map_sqlx_error)?;

        let Some(kind) = kind else {
            if let Err(e) = tx.rollback().await {
                tracing::warn!(error = %e, asset_id = %params.asset_id, "Rollback failed");
            }
            return Err(CoreError::InvalidReference {
                entity: "asset",
                id: params.asset_id.to_string(),
            });
        };

        let row = FavoriteRepo::upsert(
            &mut *tx,
            types::new_id(),
            params.user_id,
            params.asset_id,
            kind,
            &params.description,
            types::now(),
        )
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(|e| match map_sqlx_error(e) {
            CoreError::Internal(msg) => CoreError::StorageUnavailable(msg),
            other => other,
        })?;

        FavoriteAsset::try_from(row)
    }

    async fn user_favorites(&self, user_id: UserId) -> Result<Vec<FavoriteAsset>, CoreError> {
        FavoriteRepo::list_for_user(&self.pool, user_id)
            .await
            .map_err(map_sqlx_error)?
            .into_iter()
            .map(FavoriteAsset::try_from)
            .collect()
    }

    async fn update_favorite(
        &self,
        favorite_id: FavoriteId,
        user_id: UserId,
        params: &UpdateFavoriteParams,
    ) -> Result<FavoriteAsset, CoreError> {
        let row = FavoriteRepo::update_description(
            &self.pool,
            favorite_id,
            user_id,
            &params.description,
            types::now(),
        )
        .await
        .map_err(map_sqlx_error)?
        .ok_or_else(|| CoreError::not_found("favorite", favorite_id))?;

        FavoriteAsset::try_from(row)
    }

    async fn delete_favorite(
        &self,
        favorite_id: FavoriteId,
        user_id: UserId,
    ) -> Result<(), CoreError> {
        let deleted = FavoriteRepo::delete(&self.pool, favorite_id, user_id)
            .await
            .map_err(map_sqlx_error)?;
        if !deleted {
            return Err(CoreError::not_found("favorite", favorite_id));
        }
        Ok(())
    }
}
