pub mod assets;
pub mod favorites;
pub mod users;
