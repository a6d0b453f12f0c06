//! Polymorphic asset model.
//!
//! An [`Asset`] is a shared envelope (identity, timestamps) around exactly one
//! of three payload shapes. The variant tag is never stored separately: it is
//! derived from the [`AssetData`] enum, so it cannot drift from the payload and
//! cannot change after construction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::types::{self, AssetId, Timestamp};

// ---------------------------------------------------------------------------
// Variant tag
// ---------------------------------------------------------------------------

/// Discriminator for the closed set of asset shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetKind {
    Chart,
    Insight,
    Audience,
}

impl AssetKind {
    /// Every kind, in the priority order used when probing storage for an id
    /// of unknown kind.
    pub const ALL: [AssetKind; 3] = [AssetKind::Chart, AssetKind::Insight, AssetKind::Audience];

    /// Wire and storage representation of the tag.
    pub fn as_str(self) -> &'static str {
        match self {
            AssetKind::Chart => "CHART",
            AssetKind::Insight => "INSIGHT",
            AssetKind::Audience => "AUDIENCE",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CHART" => Ok(AssetKind::Chart),
            "INSIGHT" => Ok(AssetKind::Insight),
            "AUDIENCE" => Ok(AssetKind::Audience),
            other => Err(CoreError::UnsupportedVariant(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub x_axis: String,
    pub y_axis: String,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub insight: String,
}

/// Audience segment description.
///
/// The `validator` rules are transport-level checks: the constructors never
/// run them, ingestion does (see [`AssetDraft::into_asset`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_age_bounds"))]
pub struct Audience {
    pub gender: String,
    pub birth_country: String,
    #[validate(range(min = 0, max = 150))]
    pub age_min: i32,
    #[validate(range(min = 0, max = 150))]
    pub age_max: i32,
    #[validate(range(min = 0))]
    pub social_media_hours: i32,
    #[validate(range(min = 0))]
    pub last_month_purchases: i32,
}

fn validate_age_bounds(audience: &Audience) -> Result<(), ValidationError> {
    if audience.age_min > audience.age_max {
        return Err(ValidationError::new("age_min_exceeds_age_max"));
    }
    Ok(())
}

/// The payload union. Serialized adjacently tagged, so an asset renders as
/// `{ "type": "CHART", "data": { ... } }` next to its envelope fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetData {
    Chart(Chart),
    Insight(Insight),
    Audience(Audience),
}

impl AssetData {
    pub fn kind(&self) -> AssetKind {
        match self {
            AssetData::Chart(_) => AssetKind::Chart,
            AssetData::Insight(_) => AssetKind::Insight,
            AssetData::Audience(_) => AssetKind::Audience,
        }
    }
}

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

/// An asset: envelope plus payload. Fields are read-only after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    id: AssetId,
    created_at: Timestamp,
    updated_at: Timestamp,
    #[serde(flatten)]
    data: AssetData,
}

impl Asset {
    /// Wrap a payload in a fresh envelope (new id, both timestamps = now).
    pub fn new(data: AssetData) -> Self {
        let now = types::now();
        Self {
            id: types::new_id(),
            created_at: now,
            updated_at: now,
            data,
        }
    }

    pub fn chart(
        title: impl Into<String>,
        x_axis: impl Into<String>,
        y_axis: impl Into<String>,
        data: Vec<f64>,
    ) -> Self {
        Self::new(AssetData::Chart(Chart {
            title: title.into(),
            x_axis: x_axis.into(),
            y_axis: y_axis.into(),
            data,
        }))
    }

    pub fn insight(insight: impl Into<String>) -> Self {
        Self::new(AssetData::Insight(Insight {
            insight: insight.into(),
        }))
    }

    pub fn audience(audience: Audience) -> Self {
        Self::new(AssetData::Audience(audience))
    }

    /// Rebuild an asset that was already persisted, keeping its envelope.
    pub fn restore(
        id: AssetId,
        created_at: Timestamp,
        updated_at: Timestamp,
        data: AssetData,
    ) -> Self {
        Self {
            id,
            created_at,
            updated_at,
            data,
        }
    }

    pub fn id(&self) -> AssetId {
        self.id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn kind(&self) -> AssetKind {
        self.data.kind()
    }

    pub fn data(&self) -> &AssetData {
        &self.data
    }
}

// ---------------------------------------------------------------------------
// External ingestion
// ---------------------------------------------------------------------------

/// Untrusted asset submitted from outside, e.g. `POST /api/v1/assets`.
///
/// The tag is kept as a raw string so an unknown kind is reported as
/// [`CoreError::UnsupportedVariant`] instead of a generic decode failure.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetDraft {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: serde_json::Value,
}

impl AssetDraft {
    /// Parse the tag, decode the payload and run the range checks, then build
    /// a new asset around it.
    pub fn into_asset(self) -> Result<Asset, CoreError> {
        let kind: AssetKind = self.kind.parse()?;
        let data = match kind {
            AssetKind::Chart => AssetData::Chart(decode_payload(kind, self.data)?),
            AssetKind::Insight => AssetData::Insight(decode_payload(kind, self.data)?),
            AssetKind::Audience => {
                let audience: Audience = decode_payload(kind, self.data)?;
                audience
                    .validate()
                    .map_err(|e| CoreError::Validation(format!("audience: {e}")))?;
                AssetData::Audience(audience)
            }
        };
        Ok(Asset::new(data))
    }
}

fn decode_payload<T: serde::de::DeserializeOwned>(
    kind: AssetKind,
    value: serde_json::Value,
) -> Result<T, CoreError> {
    serde_json::from_value(value)
        .map_err(|e| CoreError::Validation(format!("invalid {kind} payload: {e}")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
