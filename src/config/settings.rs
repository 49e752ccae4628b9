use std::path::PathBuf;

use crate::weights::StoreLayout;

/// Where each pass reads its inputs and writes its outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSettings {
    pub stats_db: PathBuf,
    pub weights_file: PathBuf,
    pub rosters_csv: PathBuf,
    pub injuries_csv: PathBuf,
    pub schedule_csv: PathBuf,
    pub history_dir: PathBuf,
    pub latest_predictions: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            stats_db: PathBuf::from("nba_stats.db"),
            weights_file: PathBuf::from("weights.json"),
            rosters_csv: PathBuf::from("todays_rosters.csv"),
            injuries_csv: PathBuf::from("injuries.csv"),
            schedule_csv: PathBuf::from("todays_games.csv"),
            history_dir: PathBuf::from("history"),
            latest_predictions: PathBuf::from("final_predictions.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LearningSettings {
    /// Split weights by home/away as well as team and role.
    pub location_aware: bool,
}

impl Default for LearningSettings {
    fn default() -> Self {
        Self { location_aware: true }
    }
}

impl LearningSettings {
    pub fn layout(&self) -> StoreLayout {
        if self.location_aware {
            StoreLayout::ByLocation
        } else {
            StoreLayout::Flat
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub host: [u8; 4],
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { host: [0, 0, 0, 0] }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub paths: PathSettings,
    pub learning: LearningSettings,
    pub server: ServerSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with any overrides set in the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();
        let paths = &mut config.paths;

        let overrides: [(&str, &mut PathBuf); 7] = [
            ("NBA_STATS_DB", &mut paths.stats_db),
            ("WEIGHTS_FILE", &mut paths.weights_file),
            ("ROSTERS_CSV", &mut paths.rosters_csv),
            ("INJURIES_CSV", &mut paths.injuries_csv),
            ("SCHEDULE_CSV", &mut paths.schedule_csv),
            ("HISTORY_DIR", &mut paths.history_dir),
            ("LATEST_PREDICTIONS", &mut paths.latest_predictions),
        ];
        for (name, slot) in overrides {
            if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
                *slot = PathBuf::from(value.trim());
            }
        }

        if let Some(flag) = lookup("WEIGHTS_LOCATION_AWARE").and_then(|v| parse_flag(&v)) {
            config.learning.location_aware = flag;
        }

        config
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
