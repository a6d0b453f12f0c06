pub mod asset;
pub mod favorite;
