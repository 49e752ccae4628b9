pub mod connection;
pub mod models;
pub mod player_logs;
pub mod setup;
pub mod stats;

pub use connection::{create_pool, create_read_only_pool, get_connection, DbConn, DbPool};
pub use models::*;
pub use stats::StatsStore;
