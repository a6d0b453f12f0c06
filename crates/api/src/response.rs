//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Cursor-paginated lists
//! add `next_page_token` next to it.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": [...], "next_page_token": ... }` for keyset-paginated lists.
///
/// `next_page_token` is `null` once a page comes back empty.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub data: Vec<T>,
    pub next_page_token: Option<String>,
}
