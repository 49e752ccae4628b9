use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

/// Failures that abort a whole learning or inference pass.
#[derive(Debug, Error)]
pub enum PassError {
    #[error("missing {what} at {}: {reason}", path.display())]
    MissingDependency {
        what: &'static str,
        path: PathBuf,
        reason: String,
    },

    #[error("malformed weights file {}: {reason}", path.display())]
    MalformedWeights { path: PathBuf, reason: String },

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl PassError {
    pub fn missing(what: &'static str, path: &Path, reason: impl Into<String>) -> Self {
        PassError::MissingDependency {
            what,
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn malformed(path: &Path, reason: impl Into<String>) -> Self {
        PassError::MalformedWeights {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// Why a player, or one of its updates, was left out of a pass. Never fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    InsufficientHistory { games: usize, required: usize },
    Unmappable,
    Malformed(String),
    Injured,
}

impl SkipReason {
    pub fn label(&self) -> &'static str {
        match self {
            SkipReason::InsufficientHistory { .. } => "insufficient history",
            SkipReason::Unmappable => "not on roster",
            SkipReason::Malformed(_) => "malformed records",
            SkipReason::Injured => "injured",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InsufficientHistory { games, required } => {
                write!(f, "{games} games recorded, {required} required")
            }
            SkipReason::Unmappable => f.write_str("no team found in roster"),
            SkipReason::Malformed(reason) => write!(f, "malformed records: {reason}"),
            SkipReason::Injured => f.write_str("listed on the injury report"),
        }
    }
}

/// Per-reason skip counters reported at the end of a pass.
#[derive(Debug, Default, Clone)]
pub struct SkipTally {
    counts: BTreeMap<&'static str, usize>,
}

impl SkipTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, reason: &SkipReason) {
        *self.counts.entry(reason.label()).or_insert(0) += 1;
    }

    pub fn count(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn log_summary(&self) {
        if self.counts.is_empty() {
            info!("  → Nothing skipped");
            return;
        }
        info!("  → {} skipped", self.total());
        for (label, count) in &self.counts {
            info!("    → {}: {}", label, count);
        }
    }
}

/// Add context to file read errors
pub fn read_context(what: &str, path: &Path) -> String {
    format!("Failed to read {} from {}", what, path.display())
}

/// Add context to file write errors
pub fn write_context(what: &str, path: &Path) -> String {
    format!("Failed to write {} to {}", what, path.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_counts_by_reason() {
        let mut tally = SkipTally::new();
        tally.record(&SkipReason::Unmappable);
        tally.record(&SkipReason::Unmappable);
        tally.record(&SkipReason::InsufficientHistory {
            games: 4,
            required: 11,
        });

        assert_eq!(tally.count("not on roster"), 2);
        assert_eq!(tally.count("insufficient history"), 1);
        assert_eq!(tally.count("injured"), 0);
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn test_pass_error_messages() {
        let err = PassError::missing("stats database", Path::new("nba_stats.db"), "file not found");
        assert_eq!(
            err.to_string(),
            "missing stats database at nba_stats.db: file not found"
        );

        let err = PassError::Configuration("unknown learning mode 'weekly'".to_string());
        assert!(err.to_string().starts_with("configuration error"));
    }
}
