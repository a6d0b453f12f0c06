//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` (or `&mut PgConnection` when the call must join a transaction) as
//! the first argument and return raw `sqlx` results.

pub mod asset_repo;
pub mod favorite_repo;

pub use asset_repo::AssetRepo;
pub use favorite_repo::FavoriteRepo;
