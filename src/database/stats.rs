use std::path::{Path, PathBuf};

use anyhow::Result;
use log::info;

use super::connection::{create_read_only_pool, get_connection, DbPool};
use super::models::DbPlayerLog;
use super::player_logs;
use crate::errors::PassError;

/// Read-only view of the historical game logs.
pub struct StatsStore {
    pool: DbPool,
    path: PathBuf,
}

impl StatsStore {
    /// Open the logs database; a missing file or table fails the pass.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(PassError::missing("stats database", &path, "file not found").into());
        }

        let pool = create_read_only_pool(&path.to_string_lossy())
            .map_err(|e| PassError::missing("stats database", &path, format!("{e:#}")))?;
        let store = Self { pool, path };

        let mut conn = get_connection(&store.pool)?;
        if !player_logs::table_exists(&mut conn)? {
            return Err(
                PassError::missing("stats database", &store.path, "no player_logs table").into(),
            );
        }
        info!(
            "Opened stats database {} ({} game logs)",
            store.path.display(),
            player_logs::count_all(&mut conn)?
        );
        drop(conn);

        Ok(store)
    }

    pub fn player_ids(&self) -> Result<Vec<i64>> {
        let mut conn = get_connection(&self.pool)?;
        player_logs::list_player_ids(&mut conn)
    }

    pub fn logs_for_player(&self, player_id: i64) -> Result<Vec<DbPlayerLog>> {
        let mut conn = get_connection(&self.pool)?;
        player_logs::list_by_player(&mut conn, player_id)
    }
}
