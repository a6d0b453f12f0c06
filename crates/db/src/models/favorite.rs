//! Row shape for the `user_favorites` table.

use assetdeck_core::error::CoreError;
use assetdeck_core::favorite::FavoriteAsset;
use assetdeck_core::types::{AssetId, FavoriteId, Timestamp, UserId};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct FavoriteRow {
    pub id: FavoriteId,
    pub user_id: UserId,
    pub asset_id: AssetId,
    pub asset_type: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<FavoriteRow> for FavoriteAsset {
    type Error = CoreError;

    fn try_from(row: FavoriteRow) -> Result<Self, Self::Error> {
        let asset_type = row.asset_type.parse().map_err(|_| CoreError::CorruptRow {
            id: row.id.to_string(),
            reason: format!("unknown asset_type {}", row.asset_type),
        })?;
        Ok(FavoriteAsset {
            id: row.id,
            user_id: row.user_id,
            asset_id: row.asset_id,
            asset_type,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
