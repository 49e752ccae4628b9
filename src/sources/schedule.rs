use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::domain::ScheduledGame;
use crate::errors::read_context;

/// Load the day's games. Without a schedule every team resolves HOME.
pub fn load_schedule(path: &Path) -> Result<Vec<ScheduledGame>> {
    if !path.is_file() {
        warn!("No schedule at {}, every team treated as home", path.display());
        return Ok(Vec::new());
    }

    let mut reader = csv::Reader::from_path(path).with_context(|| read_context("schedule", path))?;
    let games = reader
        .deserialize()
        .collect::<Result<Vec<ScheduledGame>, _>>()
        .with_context(|| read_context("schedule", path))?;

    info!("Loaded schedule: {} games", games.len());
    Ok(games)
}
