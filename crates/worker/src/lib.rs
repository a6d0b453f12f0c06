//! Background write engine for favorites.
//!
//! Accepted favorite requests are queued and committed by a fixed set of
//! tokio tasks, so callers get an answer before the write reaches storage.

pub mod pool;

pub use pool::{FavoriteWorkerPool, PoolConfig, PoolState, PoolStats, SubmitOutcome};
