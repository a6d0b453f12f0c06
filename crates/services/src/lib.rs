//! Application services.
//!
//! Each service owns one slice of the domain and talks to storage only through
//! the traits in `assetdeck_core::store` and `assetdeck_core::user`, so the
//! same code runs against Postgres and the in-memory store.

use std::future::Future;
use std::time::Duration;

use assetdeck_core::error::{CoreError, OperationContext};

pub mod assets;
pub mod favorites;
pub mod users;

pub use assets::AssetService;
pub use favorites::FavoritesService;
pub use users::{InMemoryUserDirectory, UsersService};

/// Deadline for writes that must complete even if the caller goes away.
pub const BACKGROUND_TIMEOUT: Duration = Duration::from_secs(15);

/// Run `fut` on its own task under [`BACKGROUND_TIMEOUT`].
///
/// Dropping the returned future does not cancel the work. Errors come back
/// tagged with `operation`.
pub(crate) async fn detached<T, F>(operation: &'static str, fut: F) -> Result<T, CoreError>
where
    F: Future<Output = Result<T, CoreError>> + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::spawn(async move {
        tokio::time::timeout(BACKGROUND_TIMEOUT, fut)
            .await
            .map_err(|_| CoreError::Timeout(format!("exceeded {BACKGROUND_TIMEOUT:?}")))?
    });

    handle
        .await
        .map_err(|e| CoreError::Internal(format!("background task failed: {e}")))
        .and_then(|result| result)
        .operation(operation)
}
