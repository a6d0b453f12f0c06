//! Favorite records and the request shapes that create or change them.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::asset::AssetKind;
use crate::types::{AssetId, FavoriteId, Timestamp, UserId};

/// Maximum length, in characters, of a favorite description.
pub const MAX_DESCRIPTION_LENGTH: usize = 128;

/// One user's favoriting of one asset.
///
/// `asset_type` is captured when the favorite is first written and never
/// re-checked against the live asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteAsset {
    pub id: FavoriteId,
    pub user_id: UserId,
    pub asset_id: AssetId,
    pub asset_type: AssetKind,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request to mark an asset as favorite. Re-submitting the same
/// `(user_id, asset_id)` pair only replaces the description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FavoriteAssetParams {
    pub user_id: UserId,
    pub asset_id: AssetId,
    #[serde(default)]
    #[validate(length(max = 128))]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdateFavoriteParams {
    #[serde(default)]
    #[validate(length(max = 128))]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::new_id;

    #[test]
    fn description_is_bounded_in_characters() {
        let at_limit = UpdateFavoriteParams {
            description: "é".repeat(MAX_DESCRIPTION_LENGTH),
        };
        assert!(at_limit.validate().is_ok());

        let over = UpdateFavoriteParams {
            description: "a".repeat(MAX_DESCRIPTION_LENGTH + 1),
        };
        assert!(over.validate().is_err());
    }

    #[test]
    fn favorite_params_accept_missing_description() {
        let user_id = new_id();
        let asset_id = new_id();
        let params: FavoriteAssetParams = serde_json::from_value(serde_json::json!({
            "user_id": user_id,
            "asset_id": asset_id,
        }))
        .unwrap();

        assert_eq!(params.description, "");
        assert!(params.validate().is_ok());
    }
}
