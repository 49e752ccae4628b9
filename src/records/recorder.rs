use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{info, warn};

use super::history::archive_file_name;
use crate::domain::PredictionRecord;
use crate::errors::{read_context, write_context};
use crate::persist::write_atomic;

const HEADER: [&str; 7] = ["Player", "TeamID", "Predicted_PTS", "Role", "L3", "L10", "Weight_Form"];

/// Writes each day's predictions to a dated archive and to the latest file.
#[derive(Debug, Clone)]
pub struct PredictionRecorder {
    history_dir: PathBuf,
    latest_path: PathBuf,
}

impl PredictionRecorder {
    pub fn new(history_dir: impl Into<PathBuf>, latest_path: impl Into<PathBuf>) -> Self {
        Self {
            history_dir: history_dir.into(),
            latest_path: latest_path.into(),
        }
    }

    pub fn archive_path(&self, date: NaiveDate) -> PathBuf {
        self.history_dir.join(archive_file_name(date))
    }

    pub fn latest_path(&self) -> &Path {
        &self.latest_path
    }

    /// Returns false when there was nothing to write; both sinks are then left alone.
    pub fn record(&self, date: NaiveDate, rows: &[PredictionRecord]) -> Result<bool> {
        if rows.is_empty() {
            warn!("No predictions produced, leaving previous output in place");
            return Ok(false);
        }

        let contents = render(rows)?;
        let archive = self.archive_path(date);

        write_atomic(&archive, &contents).with_context(|| write_context("prediction archive", &archive))?;
        info!("  → Archived {} predictions to {}", rows.len(), archive.display());

        write_atomic(&self.latest_path, &contents)
            .with_context(|| write_context("latest predictions", &self.latest_path))?;
        info!("  → Latest predictions written to {}", self.latest_path.display());

        Ok(true)
    }
}

fn render(rows: &[PredictionRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for row in rows {
        writer.write_record([
            row.player.clone(),
            row.team_id.to_string(),
            format!("{:.1}", row.predicted_pts),
            row.role.to_string(),
            format!("{:.1}", row.l3),
            format!("{:.1}", row.l10),
            format!("{:.2}", row.weight_form),
        ])?;
    }

    writer.into_inner().context("Failed to flush prediction rows")
}

/// Read a prediction file written by `PredictionRecorder::record`.
pub fn load_predictions(path: &Path) -> Result<Vec<PredictionRecord>> {
    let mut reader = csv::Reader::from_path(path).with_context(|| read_context("predictions", path))?;
    reader
        .deserialize()
        .collect::<Result<Vec<PredictionRecord>, _>>()
        .with_context(|| read_context("predictions", path))
}
