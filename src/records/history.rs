use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;

use crate::weights::LearnMode;

/// Longest gap since the last archived prediction that still counts as a
/// daily run. Anything longer means days were missed and history is replayed.
pub const MAX_DAILY_GAP_DAYS: i64 = 1;

static ARCHIVE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^preds_(\d{4}-\d{2}-\d{2})\.csv$").expect("valid archive name pattern")
});

pub fn archive_file_name(date: NaiveDate) -> String {
    format!("preds_{}.csv", date.format("%Y-%m-%d"))
}

/// Most recent date with an archived prediction file, if any.
pub fn last_recorded_date(history_dir: &Path) -> Result<Option<NaiveDate>> {
    if !history_dir.is_dir() {
        return Ok(None);
    }

    let entries = fs::read_dir(history_dir)
        .with_context(|| format!("Failed to list {}", history_dir.display()))?;

    let mut latest = None;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", history_dir.display()))?;
        let name = entry.file_name();
        let Some(date) = name.to_str().and_then(archive_date) else {
            continue;
        };
        latest = latest.max(Some(date));
    }
    Ok(latest)
}

fn archive_date(file_name: &str) -> Option<NaiveDate> {
    let captures = ARCHIVE_NAME.captures(file_name)?;
    NaiveDate::parse_from_str(&captures[1], "%Y-%m-%d").ok()
}

pub fn select_mode(last_recorded: Option<NaiveDate>, today: NaiveDate) -> LearnMode {
    match last_recorded {
        Some(last) if (today - last).num_days() <= MAX_DAILY_GAP_DAYS => LearnMode::Daily,
        _ => LearnMode::Replay,
    }
}
