//! Row shapes for the three asset tables and their unified listing.

use assetdeck_core::asset::{Asset, AssetData, AssetKind, Audience, Chart, Insight};
use assetdeck_core::error::CoreError;
use assetdeck_core::types::{AssetId, Timestamp};
use sqlx::FromRow;

/// A row of the `UNION ALL` listing query.
///
/// Every variant contributes all columns; those that do not apply to it are
/// `NULL`. Decoding back into an [`Asset`] checks that the columns of the
/// row's own variant are all present.
#[derive(Debug, Clone, FromRow)]
pub struct UnifiedAssetRow {
    pub id: AssetId,
    pub asset_type: String,
    pub title: Option<String>,
    pub x_axis: Option<String>,
    pub y_axis: Option<String>,
    pub chart_data: Option<Vec<f64>>,
    pub insight: Option<String>,
    pub gender: Option<String>,
    pub birth_country: Option<String>,
    pub age_min: Option<i32>,
    pub age_max: Option<i32>,
    pub social_media_hours: Option<i32>,
    pub last_month_purchases: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UnifiedAssetRow {
    fn corrupt(&self, reason: impl Into<String>) -> CoreError {
        CoreError::CorruptRow {
            id: self.id.to_string(),
            reason: reason.into(),
        }
    }

    fn required<T>(&self, value: Option<T>, column: &str) -> Result<T, CoreError> {
        value.ok_or_else(|| self.corrupt(format!("{} row without {column}", self.asset_type)))
    }
}

impl TryFrom<UnifiedAssetRow> for Asset {
    type Error = CoreError;

    fn try_from(row: UnifiedAssetRow) -> Result<Self, Self::Error> {
        let kind: AssetKind = row
            .asset_type
            .parse()
            .map_err(|_| row.corrupt(format!("unknown asset_type {}", row.asset_type)))?;

        let data = match kind {
            AssetKind::Chart => AssetData::Chart(Chart {
                title: row.required(row.title.clone(), "title")?,
                x_axis: row.required(row.x_axis.clone(), "x_axis")?,
                y_axis: row.required(row.y_axis.clone(), "y_axis")?,
                data: row.required(row.chart_data.clone(), "data")?,
            }),
            AssetKind::Insight => AssetData::Insight(Insight {
                insight: row.required(row.insight.clone(), "insight")?,
            }),
            AssetKind::Audience => AssetData::Audience(Audience {
                gender: row.required(row.gender.clone(), "gender")?,
                birth_country: row.required(row.birth_country.clone(), "birth_country")?,
                age_min: row.required(row.age_min, "age_min")?,
                age_max: row.required(row.age_max, "age_max")?,
                social_media_hours: row.required(row.social_media_hours, "social_media_hours")?,
                last_month_purchases: row
                    .required(row.last_month_purchases, "last_month_purchases")?,
            }),
        };

        Ok(Asset::restore(row.id, row.created_at, row.updated_at, data))
    }
}
