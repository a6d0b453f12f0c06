//! Users and the lookup contract the favorites flow depends on.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Timestamp, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Source of truth for user existence.
///
/// `fetch_user` must return [`CoreError::NotFound`] with entity `"user"` for
/// unknown ids; any other error is treated as an infrastructure failure.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn fetch_user(&self, id: UserId) -> Result<User, CoreError>;

    async fn list_users(&self) -> Vec<User>;
}
