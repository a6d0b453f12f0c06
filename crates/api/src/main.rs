use std::net::SocketAddr;
use std::sync::Arc;

use assetdeck_core::sampler::{sample_assets, sample_users};
use assetdeck_db::PgStore;
use assetdeck_services::InMemoryUserDirectory;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use assetdeck_api::config::ServerConfig;
use assetdeck_api::router::build_app_router;
use assetdeck_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "assetdeck_api=debug,assetdeck_worker=debug,assetdeck_services=debug,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = assetdeck_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    assetdeck_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    assetdeck_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Users ---
    let directory = Arc::new(InMemoryUserDirectory::new());
    directory
        .insert_users(sample_users(config.preloaded_users))
        .await;
    tracing::info!(count = config.preloaded_users, "User directory seeded");

    // --- App state (starts the favorite worker pool) ---
    let store = Arc::new(PgStore::new(pool.clone()));
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let shutdown_timeout = config.shutdown_timeout();
    let preloaded_assets = config.preloaded_assets;
    let state = AppState::build(config, store, directory, Arc::new(pool));

    // --- Sample assets ---
    state
        .assets
        .store_assets(sample_assets(preloaded_assets))
        .await
        .expect("Failed to store sample assets");
    tracing::info!(count = preloaded_assets, "Sample assets stored");

    let favorites = state.favorites.clone();
    let app = build_app_router(state);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, draining favorite writes");

    match favorites.shutdown(shutdown_timeout).await {
        Ok(()) => tracing::info!(stats = ?favorites.pool_stats(), "Favorite worker pool drained"),
        Err(e) => tracing::warn!(
            error = %e,
            stats = ?favorites.pool_stats(),
            "Favorite worker pool did not drain cleanly",
        ),
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
