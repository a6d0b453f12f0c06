//! Fixed-size worker pool that commits favorites in the background.
//!
//! Workers share one unbounded queue, so a submission accepted while the pool
//! is `Running` is always attempted before shutdown completes. Each task gets
//! its own write deadline, computed when a worker picks it up, so it never
//! inherits the deadline of the request that submitted it.
//!
//! Lifecycle: `Running` -> `Draining` (on [`FavoriteWorkerPool::shutdown`]) ->
//! `Stopped` (once the last worker exits). Submissions are only accepted while
//! `Running`.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use assetdeck_core::error::CoreError;
use assetdeck_core::favorite::FavoriteAssetParams;
use assetdeck_core::store::FavoriteStore;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Default number of worker tasks.
pub const DEFAULT_WORKERS: usize = 10;

/// Default time a single write may take.
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub workers: usize,
    pub write_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    Running,
    Draining,
    Stopped,
}

/// Result of handing a task to the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Queued for a worker.
    Accepted,
    /// The pool is shutting down; the task was discarded.
    Rejected,
}

/// Snapshot of the pool counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub submitted: u64,
    pub rejected: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub timed_out: u64,
}

#[derive(Default)]
struct Counters {
    submitted: AtomicU64,
    rejected: AtomicU64,
    succeeded: AtomicU64,
    failed: AtomicU64,
    timed_out: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> PoolStats {
        PoolStats {
            submitted: self.submitted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            timed_out: self.timed_out.load(Ordering::Relaxed),
        }
    }
}

/// State shared between the pool handle and its workers.
struct Shared {
    store: Arc<dyn FavoriteStore>,
    queue: tokio::sync::Mutex<mpsc::UnboundedReceiver<FavoriteAssetParams>>,
    write_timeout: Duration,
    state: watch::Sender<PoolState>,
    live_workers: AtomicUsize,
    counters: Counters,
}

impl Shared {
    fn worker_exited(&self) {
        if self.live_workers.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.state.send_replace(PoolState::Stopped);
            tracing::info!("Favorite worker pool stopped");
        }
    }
}

/// Pool of tokio tasks that persist favorites through a [`FavoriteStore`].
///
/// Must be started inside a tokio runtime.
pub struct FavoriteWorkerPool {
    sender: Mutex<Option<mpsc::UnboundedSender<FavoriteAssetParams>>>,
    shared: Arc<Shared>,
    hard_stop: CancellationToken,
}

impl FavoriteWorkerPool {
    /// Spawn the workers and return a running pool.
    pub fn start(store: Arc<dyn FavoriteStore>, config: PoolConfig) -> Self {
        let workers = config.workers.max(1);
        let (sender, receiver) = mpsc::unbounded_channel();
        let (state, _) = watch::channel(PoolState::Running);

        let shared = Arc::new(Shared {
            store,
            queue: tokio::sync::Mutex::new(receiver),
            write_timeout: config.write_timeout,
            state,
            live_workers: AtomicUsize::new(workers),
            counters: Counters::default(),
        });
        let hard_stop = CancellationToken::new();

        for index in 0..workers {
            tokio::spawn(run_worker(index, Arc::clone(&shared), hard_stop.clone()));
        }

        tracing::info!(
            workers,
            write_timeout_ms = config.write_timeout.as_millis() as u64,
            "Favorite worker pool started",
        );

        Self {
            sender: Mutex::new(Some(sender)),
            shared,
            hard_stop,
        }
    }

    /// Queue a favorite write without waiting for it.
    pub fn submit(&self, params: FavoriteAssetParams) -> SubmitOutcome {
        let counters = &self.shared.counters;
        let guard = self.sender.lock().unwrap_or_else(PoisonError::into_inner);

        let Some(sender) = guard.as_ref() else {
            counters.rejected.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                user_id = %params.user_id,
                asset_id = %params.asset_id,
                "Favorite discarded, pool is shutting down",
            );
            return SubmitOutcome::Rejected;
        };

        match sender.send(params) {
            Ok(()) => {
                counters.submitted.fetch_add(1, Ordering::Relaxed);
                SubmitOutcome::Accepted
            }
            // Receiver closed.
            Err(mpsc::error::SendError(params)) => {
                counters.rejected.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(
                    user_id = %params.user_id,
                    asset_id = %params.asset_id,
                    "Favorite discarded, queue closed",
                );
                SubmitOutcome::Rejected
            }
        }
    }

    /// Stop accepting work and wait for queued and in-flight tasks to finish.
    ///
    /// Returns [`CoreError::Timeout`] if the pool has not stopped within
    /// `deadline`; the workers keep going in the background. Calling this
    /// again after the pool stopped returns `Ok` straight away.
    pub async fn shutdown(&self, deadline: Duration) -> Result<(), CoreError> {
        {
            let mut guard = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
            if guard.take().is_some() {
                self.shared.state.send_if_modified(|state| {
                    if *state == PoolState::Running {
                        *state = PoolState::Draining;
                        true
                    } else {
                        false
                    }
                });
                tracing::info!("Favorite worker pool draining");
            }
        }

        let mut state = self.shared.state.subscribe();
        let waited = tokio::time::timeout(deadline, state.wait_for(|s| *s == PoolState::Stopped))
            .await
            .map(|changed| changed.map(|_| ()));

        match waited {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_)) => Err(CoreError::Internal(
                "favorite pool state channel closed".to_string(),
            )),
            Err(_) => {
                tracing::warn!(
                    deadline_ms = deadline.as_millis() as u64,
                    "Favorite worker pool did not drain in time",
                );
                Err(CoreError::Timeout(format!(
                    "favorite worker pool did not drain within {deadline:?}"
                )))
            }
        }
    }

    pub fn state(&self) -> PoolState {
        *self.shared.state.borrow()
    }

    /// Watch lifecycle transitions.
    pub fn subscribe(&self) -> watch::Receiver<PoolState> {
        self.shared.state.subscribe()
    }

    pub fn stats(&self) -> PoolStats {
        self.shared.counters.snapshot()
    }
}

impl Drop for FavoriteWorkerPool {
    fn drop(&mut self) {
        if self.state() == PoolState::Running {
            tracing::warn!("Favorite worker pool dropped without shutdown, abandoning queue");
            self.hard_stop.cancel();
        }
    }
}

// ---------------------------------------------------------------------------
// Worker loop
// ---------------------------------------------------------------------------

async fn run_worker(index: usize, shared: Arc<Shared>, hard_stop: CancellationToken) {
    tracing::debug!(worker = index, "Favorite worker started");

    loop {
        let next = tokio::select! {
            biased;
            _ = hard_stop.cancelled() => break,
            next = async { shared.queue.lock().await.recv().await } => next,
        };

        // Closed and empty.
        let Some(params) = next else { break };

        tokio::select! {
            biased;
            _ = hard_stop.cancelled() => break,
            _ = commit(&shared, params) => {}
        }
    }

    tracing::debug!(worker = index, "Favorite worker exiting");
    shared.worker_exited();
}

async fn commit(shared: &Shared, params: FavoriteAssetParams) {
    let deadline = Instant::now() + shared.write_timeout;
    let counters = &shared.counters;

    match tokio::time::timeout_at(deadline, shared.store.store_favorite(&params)).await {
        Ok(Ok(favorite)) => {
            counters.succeeded.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                favorite_id = %favorite.id,
                user_id = %favorite.user_id,
                asset_id = %favorite.asset_id,
                "Favorite stored",
            );
        }
        Ok(Err(e)) => {
            counters.failed.fetch_add(1, Ordering::Relaxed);
            tracing::error!(
                user_id = %params.user_id,
                asset_id = %params.asset_id,
                error = %e,
                "Failed to store favorite",
            );
        }
        Err(_) => {
            counters.timed_out.fetch_add(1, Ordering::Relaxed);
            tracing::error!(
                user_id = %params.user_id,
                asset_id = %params.asset_id,
                timeout_ms = shared.write_timeout.as_millis() as u64,
                "Favorite write timed out",
            );
        }
    }
}
