use std::sync::Arc;

use assetdeck_core::store::{AssetStore, FavoriteStore};
use assetdeck_core::user::UserDirectory;
use assetdeck_db::DbPool;
use assetdeck_services::{AssetService, FavoritesService, UsersService};
use assetdeck_worker::FavoriteWorkerPool;
use async_trait::async_trait;

use crate::config::ServerConfig;

/// Storage reachability check reported by `GET /health`.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn is_healthy(&self) -> bool;
}

#[async_trait]
impl HealthCheck for DbPool {
    async fn is_healthy(&self) -> bool {
        assetdeck_db::health_check(self).await.is_ok()
    }
}

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: every service holds its collaborators behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub assets: AssetService,
    pub favorites: FavoritesService,
    pub users: UsersService,
    pub health: Arc<dyn HealthCheck>,
}

impl AppState {
    /// Wire the services around one store and start the favorite worker pool.
    ///
    /// Must be called inside a tokio runtime.
    pub fn build<S>(
        config: ServerConfig,
        store: Arc<S>,
        directory: Arc<dyn UserDirectory>,
        health: Arc<dyn HealthCheck>,
    ) -> Self
    where
        S: AssetStore + FavoriteStore + 'static,
    {
        let users = UsersService::new(directory);
        let pool = FavoriteWorkerPool::start(store.clone(), config.pool_config());
        let favorites = FavoritesService::new(store.clone(), users.clone(), Arc::new(pool));
        let assets = AssetService::new(store);

        Self {
            config: Arc::new(config),
            assets,
            favorites,
            users,
            health,
        }
    }
}
