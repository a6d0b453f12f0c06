//! Repository for the per-variant asset tables.
//!
//! Writes go to exactly one of `chart_assets`, `insight_assets` or
//! `audience_assets`. Reads see all three as a single relation through a
//! `UNION ALL` that pads the columns each variant lacks with typed `NULL`s.

use assetdeck_core::asset::{Asset, AssetData, AssetKind, Audience, Chart, Insight};
use assetdeck_core::types::AssetId;
use sqlx::{PgConnection, PgPool};

use crate::models::asset::UnifiedAssetRow;

/// Keyset listing over the union of all asset tables.
///
/// `$1` is the cursor (NULL = from the beginning), `$2` the page size.
const LIST_QUERY: &str = "\
    SELECT * FROM ( \
        SELECT id, 'CHART'::text AS asset_type, \
               title, x_axis, y_axis, data AS chart_data, \
               NULL::text AS insight, \
               NULL::text AS gender, NULL::text AS birth_country, \
               NULL::integer AS age_min, NULL::integer AS age_max, \
               NULL::integer AS social_media_hours, NULL::integer AS last_month_purchases, \
               created_at, updated_at \
        FROM chart_assets \
        UNION ALL \
        SELECT id, 'INSIGHT'::text, \
               NULL::text, NULL::text, NULL::text, NULL::float8[], \
               insight, \
               NULL::text, NULL::text, \
               NULL::integer, NULL::integer, \
               NULL::integer, NULL::integer, \
               created_at, updated_at \
        FROM insight_assets \
        UNION ALL \
        SELECT id, 'AUDIENCE'::text, \
               NULL::text, NULL::text, NULL::text, NULL::float8[], \
               NULL::text, \
               gender, birth_country, \
               age_min, age_max, \
               social_media_hours, last_month_purchases, \
               created_at, updated_at \
        FROM audience_assets \
    ) combined \
    WHERE ($1::uuid IS NULL OR combined.id > $1) \
    ORDER BY combined.id \
    LIMIT $2";

/// Resolve which table holds an id, probing chart, insight, audience in that
/// order and stopping at the first hit.
const RESOLVE_KIND_QUERY: &str = "\
    SELECT CASE \
        WHEN EXISTS (SELECT 1 FROM chart_assets WHERE id = $1) THEN 'CHART' \
        WHEN EXISTS (SELECT 1 FROM insight_assets WHERE id = $1) THEN 'INSIGHT' \
        WHEN EXISTS (SELECT 1 FROM audience_assets WHERE id = $1) THEN 'AUDIENCE' \
    END";

/// Provides insert and listing operations for assets of every variant.
pub struct AssetRepo;

impl AssetRepo {
    /// Insert an asset into its variant's table.
    pub async fn insert(pool: &PgPool, asset: &Asset) -> Result<(), sqlx::Error> {
        match asset.data() {
            AssetData::Chart(chart) => Self::insert_chart(pool, asset, chart).await,
            AssetData::Insight(insight) => Self::insert_insight(pool, asset, insight).await,
            AssetData::Audience(audience) => Self::insert_audience(pool, asset, audience).await,
        }
    }

    /// Up to `limit` rows with id greater than `after`, ascending by id.
    pub async fn list_after(
        pool: &PgPool,
        after: Option<AssetId>,
        limit: i64,
    ) -> Result<Vec<UnifiedAssetRow>, sqlx::Error> {
        sqlx::query_as::<_, UnifiedAssetRow>(LIST_QUERY)
            .bind(after)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Find the variant of an asset id, or `None` if no table holds it.
    ///
    /// Takes a connection so callers can run it inside their own transaction.
    /// An unrecognised tag cannot come back from the query, so it is reported
    /// as `None` alongside "not found".
    pub async fn resolve_kind(
        conn: &mut PgConnection,
        id: AssetId,
    ) -> Result<Option<AssetKind>, sqlx::Error> {
        let tag: Option<String> = sqlx::query_scalar(RESOLVE_KIND_QUERY)
            .bind(id)
            .fetch_one(conn)
            .await?;
        Ok(tag.and_then(|t| t.parse().ok()))
    }

    // -----------------------------------------------------------------------
    // Variant writers
    // -----------------------------------------------------------------------

    async fn insert_chart(pool: &PgPool, asset: &Asset, chart: &Chart) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO chart_assets (id, title, x_axis, y_axis, data, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(asset.id())
        .bind(&chart.title)
        .bind(&chart.x_axis)
        .bind(&chart.y_axis)
        .bind(&chart.data)
        .bind(asset.created_at())
        .bind(asset.updated_at())
        .execute(pool)
        .await?;
        Ok(())
    }

    async fn insert_insight(
        pool: &PgPool,
        asset: &Asset,
        insight: &Insight,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO insight_assets (id, insight, created_at, updated_at) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(asset.id())
        .bind(&insight.insight)
        .bind(asset.created_at())
        .bind(asset.updated_at())
        .execute(pool)
        .await?;
        Ok(())
    }

    async fn insert_audience(
        pool: &PgPool,
        asset: &Asset,
        audience: &Audience,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO audience_assets (\
                id, gender, birth_country, age_min, age_max, \
                social_media_hours, last_month_purchases, created_at, updated_at\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(asset.id())
        .bind(&audience.gender)
        .bind(&audience.birth_country)
        .bind(audience.age_min)
        .bind(audience.age_max)
        .bind(audience.social_media_hours)
        .bind(audience.last_month_purchases)
        .bind(asset.created_at())
        .bind(asset.updated_at())
        .execute(pool)
        .await?;
        Ok(())
    }
}
