use std::str::FromStr;
use std::time::Duration;

use assetdeck_worker::PoolConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8090`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Time allowed for draining queued favorite writes on shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Number of favorite worker tasks (default: `10`).
    pub favorite_workers: usize,
    /// Deadline for one background favorite write (default: `15`).
    pub favorite_write_timeout_secs: u64,
    /// Sample assets stored at startup (default: `100`).
    pub preloaded_assets: usize,
    /// Sample users seeded into the directory at startup (default: `50`).
    pub preloaded_users: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                 |
    /// |-------------------------------|-------------------------|
    /// | `HOST`                        | `0.0.0.0`               |
    /// | `PORT`                        | `8090`                  |
    /// | `CORS_ORIGINS`                | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`       | `30`                    |
    /// | `FAVORITE_WORKERS`            | `10`                    |
    /// | `FAVORITE_WRITE_TIMEOUT_SECS` | `15`                    |
    /// | `PRELOADED_ASSETS`            | `100`                   |
    /// | `PRELOADED_USERS`             | `50`                    |
    ///
    /// Panics on values that do not parse; misconfiguration should stop
    /// startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            host,
            port: env_or("PORT", 8090),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", 30),
            favorite_workers: env_or("FAVORITE_WORKERS", 10),
            favorite_write_timeout_secs: env_or("FAVORITE_WRITE_TIMEOUT_SECS", 15),
            preloaded_assets: env_or("PRELOADED_ASSETS", 100),
            preloaded_users: env_or("PRELOADED_USERS", 50),
        }
    }

    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            workers: self.favorite_workers,
            write_timeout: Duration::from_secs(self.favorite_write_timeout_secs),
        }
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{key} must be a valid value: {e}")),
        Err(_) => default,
    }
}
