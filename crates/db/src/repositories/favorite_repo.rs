//! Repository for the `user_favorites` table.

use assetdeck_core::asset::AssetKind;
use assetdeck_core::types::{AssetId, FavoriteId, Timestamp, UserId};
use sqlx::{PgConnection, PgPool};

use crate::models::favorite::FavoriteRow;

/// Column list for `user_favorites` queries.
const COLUMNS: &str = "\
    id, user_id, asset_id, asset_type, description, created_at, updated_at";

/// Provides CRUD operations for favorites.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Insert a favorite, or replace the description of the existing one for
    /// the same `(user_id, asset_id)` pair.
    ///
    /// `id` is only used when a new row is created.
    #[allow(clippy::too_many_arguments)]
    pub async fn upsert(
        conn: &mut PgConnection,
        id: FavoriteId,
        user_id: UserId,
        asset_id: AssetId,
        asset_type: AssetKind,
        description: &str,
        now: Timestamp,
    ) -> Result<FavoriteRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_favorites \
                (id, user_id, asset_id, asset_type, description, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $6) \
             ON CONFLICT (user_id, asset_id) \
             DO UPDATE SET description = EXCLUDED.description, updated_at = EXCLUDED.updated_at \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FavoriteRow>(&query)
            .bind(id)
            .bind(user_id)
            .bind(asset_id)
            .bind(asset_type.as_str())
            .bind(description)
            .bind(now)
            .fetch_one(conn)
            .await
    }

    /// All favorites of a user, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Vec<FavoriteRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_favorites \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, FavoriteRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update the description of a favorite owned by `user_id`.
    ///
    /// Returns `None` when no row matches both the id and the owner.
    pub async fn update_description(
        pool: &PgPool,
        id: FavoriteId,
        user_id: UserId,
        description: &str,
        now: Timestamp,
    ) -> Result<Option<FavoriteRow>, sqlx::Error> {
        let query = format!(
            "UPDATE user_favorites \
             SET description = $1, updated_at = $2 \
             WHERE id = $3 AND user_id = $4 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FavoriteRow>(&query)
            .bind(description)
            .bind(now)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a favorite owned by `user_id`. Returns true if a row was removed.
    pub async fn delete(pool: &PgPool, id: FavoriteId, user_id: UserId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_favorites WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
