use anyhow::Result;
use chrono::NaiveDate;
use log::{debug, info};

use crate::config::AppConfig;
use crate::database::StatsStore;
use crate::domain::{self, GameRecord, PredictionRecord, RosterEntry};
use crate::errors::{SkipReason, SkipTally};
use crate::records::PredictionRecorder;
use crate::sources::{self, InjuryReport};
use crate::weights::{self, learner::HISTORY_GAMES, FormWindow, LocationResolver, WeightStore};

/// Outcome of one inference pass.
#[derive(Debug, Clone)]
pub struct PredictionReport {
    pub date: NaiveDate,
    pub rows: Vec<PredictionRecord>,
    pub written: bool,
    pub skipped: SkipTally,
}

pub struct PredictionService {
    config: AppConfig,
}

impl PredictionService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, today: NaiveDate) -> Result<PredictionReport> {
        let paths = &self.config.paths;
        info!("=== Starting Predictions for {} ===\n", today);

        let stats = StatsStore::open(&paths.stats_db)?;
        let roster = sources::load_roster(&paths.rosters_csv)?;
        let injuries = InjuryReport::load(&paths.injuries_csv)?;
        let schedule = sources::load_schedule(&paths.schedule_csv)?;
        let store = WeightStore::load(&paths.weights_file, self.config.learning.layout())?;
        let resolver = LocationResolver::from_schedule(&schedule);
        info!("  → Loaded {} weight entries\n", store.len());

        let mut skipped = SkipTally::new();
        let mut rows = Vec::new();

        for entry in &roster {
            if injuries.is_injured(&entry.player_name) {
                skipped.record(&SkipReason::Injured);
                continue;
            }

            let logs = stats.logs_for_player(entry.player_id)?;
            let outcome = domain::build_game_records(&logs, entry.team_id)
                .and_then(|games| predict_player(entry, &games, &store, &resolver));

            match outcome {
                Ok(row) => rows.push(row),
                Err(reason) => {
                    debug!("Skipping {}: {}", entry.player_name, reason);
                    skipped.record(&reason);
                }
            }
        }

        rows.sort_by(|a, b| b.predicted_pts.total_cmp(&a.predicted_pts));
        info!("  → Predicted {} of {} roster players", rows.len(), roster.len());
        skipped.log_summary();

        let recorder = PredictionRecorder::new(&paths.history_dir, &paths.latest_predictions);
        let written = recorder.record(today, &rows)?;

        info!("=== Predictions Complete ===");
        Ok(PredictionReport {
            date: today,
            rows,
            written,
            skipped,
        })
    }
}

/// Blend one roster player's latest form and class averages.
///
/// `games` must be sorted oldest first. The store is only read.
pub fn predict_player(
    entry: &RosterEntry,
    games: &[GameRecord],
    store: &WeightStore,
    resolver: &LocationResolver,
) -> Result<PredictionRecord, SkipReason> {
    let window = FormWindow::latest(games).ok_or(SkipReason::InsufficientHistory {
        games: games.len(),
        required: HISTORY_GAMES,
    })?;

    let role = weights::classify(window.avg_minutes);
    let location = resolver.resolve(entry.team_id);
    let key = store
        .key(entry.team_id, Some(location), role)
        .ok_or_else(|| SkipReason::Malformed("no weight context".to_string()))?;
    let weight = store.get(key);

    Ok(PredictionRecord {
        player: entry.player_name.clone(),
        team_id: entry.team_id,
        predicted_pts: weights::blend(window.l3_avg, window.l10_avg, weight),
        role,
        l3: window.l3_avg,
        l10: window.l10_avg,
        weight_form: weight.form_weight,
    })
}
