//! Domain model and contracts for assetdeck.
//!
//! Pure types, validation and the storage/user-lookup traits. No I/O lives
//! here; the Postgres adapter, the worker pool and the HTTP layer all build on
//! these definitions.

pub mod asset;
pub mod error;
pub mod favorite;
pub mod pagination;
pub mod sampler;
pub mod store;
pub mod types;
pub mod user;
