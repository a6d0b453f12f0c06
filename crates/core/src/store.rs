//! Storage contracts.
//!
//! Implemented by the Postgres adapter and the in-memory store in
//! `assetdeck-db`. Services and the favorite worker pool only see these traits.

use async_trait::async_trait;

use crate::asset::Asset;
use crate::error::CoreError;
use crate::favorite::{FavoriteAsset, FavoriteAssetParams, UpdateFavoriteParams};
use crate::pagination::AssetPage;
use crate::types::{AssetId, FavoriteId, UserId};

/// Persistence for assets split across one physical collection per variant.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Insert the asset into its variant's collection. No upsert: a colliding
    /// id fails with [`CoreError::Conflict`].
    async fn store_asset(&self, asset: &Asset) -> Result<(), CoreError>;

    /// Up to `page_size` assets of any variant with id strictly greater than
    /// `cursor`, in ascending id order. `page_size` must be positive.
    ///
    /// A single undecodable row fails the whole page with
    /// [`CoreError::CorruptRow`].
    async fn list_assets(
        &self,
        cursor: Option<AssetId>,
        page_size: i64,
    ) -> Result<AssetPage, CoreError>;
}

/// Persistence for favorites, including the cross-check against assets.
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// Atomically verify the asset exists (probing variants in
    /// [`AssetKind::ALL`](crate::asset::AssetKind::ALL) order) and upsert the
    /// favorite keyed by `(user_id, asset_id)`.
    ///
    /// Fails with [`CoreError::InvalidReference`] when the asset is missing;
    /// nothing is written in that case.
    async fn store_favorite(&self, params: &FavoriteAssetParams)
        -> Result<FavoriteAsset, CoreError>;

    /// All favorites of a user, most recently created first.
    async fn user_favorites(&self, user_id: UserId) -> Result<Vec<FavoriteAsset>, CoreError>;

    /// Replace the description of a favorite owned by `user_id`.
    ///
    /// A missing favorite and one owned by someone else both fail with
    /// [`CoreError::NotFound`].
    async fn update_favorite(
        &self,
        favorite_id: FavoriteId,
        user_id: UserId,
        params: &UpdateFavoriteParams,
    ) -> Result<FavoriteAsset, CoreError>;

    /// Delete a favorite owned by `user_id`; same visibility rule as
    /// [`update_favorite`](Self::update_favorite).
    async fn delete_favorite(&self, favorite_id: FavoriteId, user_id: UserId)
        -> Result<(), CoreError>;
}
