//! User lookup.
//!
//! Users are not persisted: the directory is seeded once at startup and only
//! read afterwards.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use assetdeck_core::error::{CoreError, OperationContext};
use assetdeck_core::types::UserId;
use assetdeck_core::user::{User, UserDirectory};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Deadline for a single user lookup.
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_users(&self, users: impl IntoIterator<Item = User>) {
        let mut map = self.users.write().await;
        for user in users {
            map.insert(user.id, user);
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn fetch_user(&self, id: UserId) -> Result<User, CoreError> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("user", id))
    }

    async fn list_users(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        users
    }
}

/// Bounded-time access to a [`UserDirectory`].
#[derive(Clone)]
pub struct UsersService {
    directory: Arc<dyn UserDirectory>,
}

impl UsersService {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    pub async fn fetch_user(&self, id: UserId) -> Result<User, CoreError> {
        tokio::time::timeout(LOOKUP_TIMEOUT, self.directory.fetch_user(id))
            .await
            .map_err(|_| CoreError::Timeout(format!("user lookup for {id}")))
            .and_then(|result| result)
            .operation("fetch_user")
    }

    pub async fn list_users(&self) -> Result<Vec<User>, CoreError> {
        tokio::time::timeout(LOOKUP_TIMEOUT, self.directory.list_users())
            .await
            .map_err(|_| CoreError::Timeout("user listing".to_string()))
            .operation("list_users")
    }
}
