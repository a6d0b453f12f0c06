//! In-process store with the same semantics as [`PgStore`](crate::PgStore).
//!
//! Keeps one ordered map per asset variant, mirroring the physical layout, and
//! merges them on read. Every operation runs under a single `RwLock`, which
//! gives favorite writes the same check-then-write atomicity the Postgres
//! transaction provides.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

use assetdeck_core::asset::{Asset, AssetKind};
use assetdeck_core::error::CoreError;
use assetdeck_core::favorite::{FavoriteAsset, FavoriteAssetParams, UpdateFavoriteParams};
use assetdeck_core::pagination::AssetPage;
use assetdeck_core::store::{AssetStore, FavoriteStore};
use assetdeck_core::types::{self, AssetId, FavoriteId, UserId};
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    charts: BTreeMap<AssetId, Asset>,
    insights: BTreeMap<AssetId, Asset>,
    audiences: BTreeMap<AssetId, Asset>,
    favorites: HashMap<FavoriteId, FavoriteAsset>,
}

impl Tables {
    fn table(&self, kind: AssetKind) -> &BTreeMap<AssetId, Asset> {
        match kind {
            AssetKind::Chart => &self.charts,
            AssetKind::Insight => &self.insights,
            AssetKind::Audience => &self.audiences,
        }
    }

    fn table_mut(&mut self, kind: AssetKind) -> &mut BTreeMap<AssetId, Asset> {
        match kind {
            AssetKind::Chart => &mut self.charts,
            AssetKind::Insight => &mut self.insights,
            AssetKind::Audience => &mut self.audiences,
        }
    }

    fn resolve_kind(&self, id: AssetId) -> Option<AssetKind> {
        AssetKind::ALL
            .into_iter()
            .find(|kind| self.table(*kind).contains_key(&id))
    }
}

/// Asset and favorite storage held entirely in memory.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of favorite rows currently stored, across all users.
    pub async fn favorite_count(&self) -> usize {
        self.tables.read().await.favorites.len()
    }
}

#[async_trait]
impl AssetStore for MemoryStore {
    async fn store_asset(&self, asset: &Asset) -> Result<(), CoreError> {
        let mut tables = self.tables.write().await;
        let table = tables.table_mut(asset.kind());
        if table.contains_key(&asset.id()) {
            return Err(CoreError::Conflict(format!(
                "asset {} already exists",
                asset.id()
            )));
        }
        table.insert(asset.id(), asset.clone());
        Ok(())
    }

    async fn list_assets(
        &self,
        cursor: Option<AssetId>,
        page_size: i64,
    ) -> Result<AssetPage, CoreError> {
        let limit = usize::try_from(page_size)
            .map_err(|_| CoreError::Validation(format!("invalid page size {page_size}")))?;
        let lower = match cursor {
            Some(id) => Bound::Excluded(id),
            None => Bound::Unbounded,
        };

        let tables = self.tables.read().await;
        let mut merged: Vec<Asset> = AssetKind::ALL
            .into_iter()
            .flat_map(|kind| {
                tables
                    .table(kind)
                    .range((lower, Bound::Unbounded))
                    .take(limit)
                    .map(|(_, asset)| asset.clone())
            })
            .collect();
        merged.sort_by_key(Asset::id);
        merged.truncate(limit);

        Ok(AssetPage::from_items(merged))
    }
}

#[async_trait]
impl FavoriteStore for MemoryStore {
    async fn store_favorite(
        &self,
        params: &FavoriteAssetParams,
    ) -> Result<FavoriteAsset, CoreError> {
        let mut tables = self.tables.write().await;

        let kind = tables
            .resolve_kind(params.asset_id)
            .ok_or_else(|| CoreError::InvalidReference {
                entity: "asset",
                id: params.asset_id.to_string(),
            })?;

        let now = types::now();
        let existing = tables
            .favorites
            .values_mut()
            .find(|f| f.user_id == params.user_id && f.asset_id == params.asset_id);

        if let Some(favorite) = existing {
            favorite.description = params.description.clone();
            favorite.updated_at = now;
            return Ok(favorite.clone());
        }

        let favorite = FavoriteAsset {
            id: types::new_id(),
            user_id: params.user_id,
            asset_id: params.asset_id,
            asset_type: kind,
            description: params.description.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.favorites.insert(favorite.id, favorite.clone());
        Ok(favorite)
    }

    async fn user_favorites(&self, user_id: UserId) -> Result<Vec<FavoriteAsset>, CoreError> {
        let tables = self.tables.read().await;
        let mut favorites: Vec<FavoriteAsset> = tables
            .favorites
            .values()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect();
        favorites.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(favorites)
    }

    async fn update_favorite(
        &self,
        favorite_id: FavoriteId,
        user_id: UserId,
        params: &UpdateFavoriteParams,
    ) -> Result<FavoriteAsset, CoreError> {
        let mut tables = self.tables.write().await;
        match tables.favorites.get_mut(&favorite_id) {
            Some(favorite) if favorite.user_id == user_id => {
                favorite.description = params.description.clone();
                favorite.updated_at = types::now();
                Ok(favorite.clone())
            }
            _ => Err(CoreError::not_found("favorite", favorite_id)),
        }
    }

    async fn delete_favorite(
        &self,
        favorite_id: FavoriteId,
        user_id: UserId,
    ) -> Result<(), CoreError> {
        let mut tables = self.tables.write().await;
        match tables.favorites.get(&favorite_id) {
            Some(favorite) if favorite.user_id == user_id => {
                tables.favorites.remove(&favorite_id);
                Ok(())
            }
            _ => Err(CoreError::not_found("favorite", favorite_id)),
        }
    }
}
