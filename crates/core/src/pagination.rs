//! Keyset pagination over the unified asset stream.
//!
//! The page token is the canonical text of the last asset id the caller saw.
//! Storage returns rows with a strictly greater id, so pages stay stable while
//! new assets are appended.

use serde::{Deserialize, Serialize};

use crate::asset::Asset;
use crate::error::CoreError;
use crate::types::AssetId;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound on a single page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Caller-facing pagination request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageRequest {
    pub page_size: Option<i64>,
    pub page_token: Option<String>,
}

impl PageRequest {
    pub fn new(page_size: i64, page_token: Option<String>) -> Self {
        Self {
            page_size: Some(page_size),
            page_token,
        }
    }

    /// Page size clamped to `1..=MAX_PAGE_SIZE`; non-positive or missing
    /// values fall back to [`DEFAULT_PAGE_SIZE`].
    pub fn page_size(&self) -> i64 {
        match self.page_size {
            Some(size) if size > 0 => size.min(MAX_PAGE_SIZE),
            _ => DEFAULT_PAGE_SIZE,
        }
    }

    /// Decode the token into the cursor id. An empty or missing token means
    /// "from the beginning". The token is parsed exactly as sent.
    pub fn cursor(&self) -> Result<Option<AssetId>, CoreError> {
        match self.page_token.as_deref() {
            None | Some("") => Ok(None),
            Some(token) => AssetId::parse_str(token)
                .map(Some)
                .map_err(|_| CoreError::Validation(format!("invalid page token: {token}"))),
        }
    }
}

/// One page of the unified, id-ordered asset stream.
#[derive(Debug, Clone, Serialize)]
pub struct AssetPage {
    pub items: Vec<Asset>,
    /// Id of the last item, or `None` for an empty page.
    pub next_page_token: Option<String>,
}

impl AssetPage {
    /// Build a page and derive its token from the last item.
    pub fn from_items(items: Vec<Asset>) -> Self {
        let next_page_token = items.last().map(|a| a.id().to_string());
        Self {
            items,
            next_page_token,
        }
    }
}
