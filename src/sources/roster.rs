use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::domain::{PlayerId, RosterEntry, TeamId};
use crate::errors::{read_context, PassError};

/// Load today's rosters. Both passes need them, so a missing file is fatal.
pub fn load_roster(path: &Path) -> Result<Vec<RosterEntry>> {
    if !path.is_file() {
        return Err(PassError::missing("roster", path, "file not found").into());
    }

    let mut reader = csv::Reader::from_path(path).with_context(|| read_context("roster", path))?;
    let roster = reader
        .deserialize()
        .collect::<Result<Vec<RosterEntry>, _>>()
        .with_context(|| read_context("roster", path))?;

    info!("Loaded roster: {} players from {}", roster.len(), path.display());
    Ok(roster)
}

pub fn team_map(roster: &[RosterEntry]) -> HashMap<PlayerId, TeamId> {
    roster
        .iter()
        .map(|entry| (entry.player_id, entry.team_id))
        .collect()
}
