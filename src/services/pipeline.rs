use std::fs;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::info;

use super::learning::{LearningReport, LearningService};
use super::prediction::{PredictionReport, PredictionService};
use crate::config::AppConfig;
use crate::records::{last_recorded_date, select_mode};

pub struct PipelineReport {
    pub learning: LearningReport,
    pub prediction: PredictionReport,
}

/// One scheduling cycle: learn from the latest results, then predict today.
pub struct PipelineService {
    config: AppConfig,
}

impl PipelineService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, today: NaiveDate) -> Result<PipelineReport> {
        let history_dir = &self.config.paths.history_dir;
        fs::create_dir_all(history_dir)
            .with_context(|| format!("Failed to create history directory {}", history_dir.display()))?;

        let last = last_recorded_date(history_dir)?;
        let mode = select_mode(last, today);
        match last {
            Some(date) => info!("Last prediction record {}, running {} learning", date, mode),
            None => info!("No prediction history, running {} learning", mode),
        }

        let learning = LearningService::new(self.config.clone()).run(mode)?;
        let prediction = PredictionService::new(self.config.clone()).run(today)?;

        Ok(PipelineReport {
            learning,
            prediction,
        })
    }
}
