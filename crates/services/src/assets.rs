//! Listing and ingestion of assets.

use std::sync::Arc;

use assetdeck_core::asset::Asset;
use assetdeck_core::error::{CoreError, OperationContext};
use assetdeck_core::pagination::{AssetPage, PageRequest};
use assetdeck_core::store::AssetStore;
use futures::future::try_join_all;

use crate::detached;

#[derive(Clone)]
pub struct AssetService {
    store: Arc<dyn AssetStore>,
}

impl AssetService {
    pub fn new(store: Arc<dyn AssetStore>) -> Self {
        Self { store }
    }

    /// One page of the unified asset stream.
    ///
    /// The page size is clamped before it reaches storage; a malformed token is
    /// a [`CoreError::Validation`].
    pub async fn list_assets(&self, request: &PageRequest) -> Result<AssetPage, CoreError> {
        let cursor = request.cursor().operation("list_assets")?;
        let page_size = request.page_size();

        self.store
            .list_assets(cursor, page_size)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    cursor = ?cursor,
                    page_size,
                    error = %e,
                    "Failed to list assets",
                );
            })
            .operation("list_assets")
    }

    /// Persist a single asset and hand it back.
    pub async fn store_asset(&self, asset: Asset) -> Result<Asset, CoreError> {
        let store = Arc::clone(&self.store);
        detached("store_asset", async move {
            store.store_asset(&asset).await.inspect_err(|e| {
                tracing::error!(
                    asset_id = %asset.id(),
                    kind = %asset.kind(),
                    error = %e,
                    "Failed to store asset",
                );
            })?;
            Ok(asset)
        })
        .await
    }

    /// Persist a batch concurrently. The first failure is returned; inserts
    /// that already went through are kept.
    pub async fn store_assets(&self, assets: Vec<Asset>) -> Result<(), CoreError> {
        let count = assets.len();
        let writes = assets.into_iter().map(|asset| self.store_asset(asset));
        try_join_all(writes).await?;
        tracing::info!(count, "Stored asset batch");
        Ok(())
    }
}
