pub mod games;
pub mod models;

pub use games::{build_game_records, parse_game_date};
pub use models::*;
