//! Favorites orchestration.
//!
//! Creating a favorite is fire-and-forget: the service checks the user,
//! hands the write to the worker pool and returns. Reads, updates and deletes
//! go straight to storage.

use std::sync::Arc;
use std::time::Duration;

use assetdeck_core::error::{CoreError, OperationContext};
use assetdeck_core::favorite::{FavoriteAsset, FavoriteAssetParams, UpdateFavoriteParams};
use assetdeck_core::store::FavoriteStore;
use assetdeck_core::types::{FavoriteId, UserId};
use assetdeck_worker::{FavoriteWorkerPool, PoolState, PoolStats, SubmitOutcome};

use crate::detached;
use crate::users::UsersService;

#[derive(Clone)]
pub struct FavoritesService {
    store: Arc<dyn FavoriteStore>,
    users: UsersService,
    pool: Arc<FavoriteWorkerPool>,
}

impl FavoritesService {
    pub fn new(
        store: Arc<dyn FavoriteStore>,
        users: UsersService,
        pool: Arc<FavoriteWorkerPool>,
    ) -> Self {
        Self { store, users, pool }
    }

    /// Queue a favorite for the given user.
    ///
    /// Only the user check can fail. Once the request is handed to the pool,
    /// storage errors (including a missing asset) are logged by the worker and
    /// never reach the caller.
    pub async fn favorite_asset(&self, params: FavoriteAssetParams) -> Result<(), CoreError> {
        self.users.fetch_user(params.user_id).await.inspect_err(|e| {
            tracing::warn!(
                user_id = %params.user_id,
                asset_id = %params.asset_id,
                error = %e,
                "favorite_asset: user lookup failed",
            );
        })?;

        let user_id = params.user_id;
        let asset_id = params.asset_id;
        if self.pool.submit(params) == SubmitOutcome::Accepted {
            tracing::debug!(%user_id, %asset_id, "Favorite queued");
        }
        Ok(())
    }

    pub async fn fetch_user_favorites(
        &self,
        user_id: UserId,
    ) -> Result<Vec<FavoriteAsset>, CoreError> {
        self.users.fetch_user(user_id).await?;

        self.store
            .user_favorites(user_id)
            .await
            .inspect_err(|e| {
                tracing::error!(%user_id, error = %e, "fetch_user_favorites failed");
            })
            .operation("fetch_user_favorites")
    }

    /// Change the description of a favorite owned by `user_id`.
    ///
    /// Ownership is enforced by storage, so the user is not looked up first.
    pub async fn update_favorite(
        &self,
        favorite_id: FavoriteId,
        user_id: UserId,
        params: UpdateFavoriteParams,
    ) -> Result<FavoriteAsset, CoreError> {
        let store = Arc::clone(&self.store);
        detached("update_favorite", async move {
            store
                .update_favorite(favorite_id, user_id, &params)
                .await
                .inspect_err(|e| {
                    tracing::warn!(
                        %favorite_id,
                        %user_id,
                        error = %e,
                        "update_favorite failed",
                    );
                })
        })
        .await
    }

    pub async fn delete_favorite(
        &self,
        favorite_id: FavoriteId,
        user_id: UserId,
    ) -> Result<(), CoreError> {
        self.users.fetch_user(user_id).await?;

        self.store
            .delete_favorite(favorite_id, user_id)
            .await
            .inspect_err(|e| {
                tracing::warn!(%favorite_id, %user_id, error = %e, "delete_favorite failed");
            })
            .operation("delete_favorite")
    }

    /// Drain queued favorite writes.
    pub async fn shutdown(&self, deadline: Duration) -> Result<(), CoreError> {
        self.pool.shutdown(deadline).await
    }

    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    pub fn pool_state(&self) -> PoolState {
        self.pool.state()
    }
}
