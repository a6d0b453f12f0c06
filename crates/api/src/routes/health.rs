//! `GET /health`: storage reachability plus the favorite writer's lifecycle.
//!
//! Mounted at the root, outside `/api/v1`.

use assetdeck_worker::{PoolState, PoolStats};
use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when storage answers and favorites are still being accepted,
    /// `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub storage_healthy: bool,
    pub favorites: FavoritePoolHealth,
}

#[derive(Serialize)]
pub struct FavoritePoolHealth {
    pub state: &'static str,
    pub submitted: u64,
    pub rejected: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub timed_out: u64,
}

impl FavoritePoolHealth {
    fn new(state: PoolState, stats: PoolStats) -> Self {
        let state = match state {
            PoolState::Running => "running",
            PoolState::Draining => "draining",
            PoolState::Stopped => "stopped",
        };
        Self {
            state,
            submitted: stats.submitted,
            rejected: stats.rejected,
            succeeded: stats.succeeded,
            failed: stats.failed,
            timed_out: stats.timed_out,
        }
    }
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let storage_healthy = state.health.is_healthy().await;
    let pool_state = state.favorites.pool_state();

    let status = if storage_healthy && pool_state == PoolState::Running {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        storage_healthy,
        favorites: FavoritePoolHealth::new(pool_state, state.favorites.pool_stats()),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
