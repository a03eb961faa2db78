pub mod auth_store;
pub mod game_store;

pub use auth_store::{AuthRecord, AuthStore};
pub use game_store::{GameRecord, GameStore};
