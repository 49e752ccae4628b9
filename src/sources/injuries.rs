use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Deserialize;

use super::names::normalize_name;
use crate::errors::read_context;

#[derive(Debug, Deserialize)]
struct InjuryRow {
    #[serde(rename = "Player")]
    player: String,
}

/// Normalized names of players currently listed as injured.
#[derive(Debug, Clone, Default)]
pub struct InjuryReport {
    names: HashSet<String>,
}

impl InjuryReport {
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            names: names.into_iter().map(normalize_name).collect(),
        }
    }

    /// Load the injury list; without one everybody is assumed healthy.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            warn!("No injury report at {}, assuming everyone is healthy", path.display());
            return Ok(Self::default());
        }

        let mut reader = csv::Reader::from_path(path).with_context(|| read_context("injury report", path))?;
        let rows = reader
            .deserialize()
            .collect::<Result<Vec<InjuryRow>, _>>()
            .with_context(|| read_context("injury report", path))?;

        let report = Self::from_names(rows.iter().map(|row| row.player.as_str()));
        info!("Loaded injury report: {} players", report.len());
        Ok(report)
    }

    pub fn is_injured(&self, display_name: &str) -> bool {
        self.names.contains(&normalize_name(display_name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
