use std::collections::HashMap;

use anyhow::Result;
use log::{debug, info};

use crate::config::AppConfig;
use crate::database::StatsStore;
use crate::domain::{self, PlayerId, TeamId};
use crate::errors::{SkipReason, SkipTally};
use crate::sources;
use crate::weights::{self, LearnMode, PlayerUpdates, WeightStore};

/// Outcome of one learning pass.
#[derive(Debug, Clone)]
pub struct LearningReport {
    pub mode: LearnMode,
    pub players_updated: usize,
    pub updates: usize,
    /// Target games passed over for lack of a home/away side.
    pub unlocated_updates: usize,
    pub skipped: SkipTally,
}

pub struct LearningService {
    config: AppConfig,
}

impl LearningService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, mode: LearnMode) -> Result<LearningReport> {
        let paths = &self.config.paths;
        info!("=== Starting Weight Learning ({}) ===\n", mode);

        // Every input is checked before the weight file can be touched.
        let stats = StatsStore::open(&paths.stats_db)?;
        let roster = sources::load_roster(&paths.rosters_csv)?;
        let teams = sources::team_map(&roster);

        let layout = self.config.learning.layout();
        let mut store = WeightStore::load(&paths.weights_file, layout)?;
        info!("  → Loaded {} weight entries ({} layout)\n", store.len(), layout);

        let mut report = LearningReport {
            mode,
            players_updated: 0,
            updates: 0,
            unlocated_updates: 0,
            skipped: SkipTally::new(),
        };

        let player_ids = stats.player_ids()?;
        info!("  → {} players with game logs", player_ids.len());

        for player_id in player_ids {
            match self.learn_one(&stats, &teams, &mut store, player_id, mode)? {
                Ok(outcome) => {
                    report.players_updated += 1;
                    report.updates += outcome.events.len();
                    report.unlocated_updates += outcome.unlocated.len();
                    for target_index in outcome.unlocated {
                        report.skipped.record(&SkipReason::Malformed(format!(
                            "player {player_id} game {target_index} has no home/away side"
                        )));
                    }
                }
                Err(reason) => {
                    debug!("Skipping player {}: {}", player_id, reason);
                    report.skipped.record(&reason);
                }
            }
        }

        info!(
            "  → Applied {} updates across {} players",
            report.updates, report.players_updated
        );
        report.skipped.log_summary();

        store.save(&paths.weights_file)?;
        info!("  → Saved {} weight entries to {}\n", store.len(), paths.weights_file.display());

        info!("=== Weight Learning Complete ===");
        Ok(report)
    }

    /// Inner `Result` carries the per-player skip; the outer one a pass failure.
    fn learn_one(
        &self,
        stats: &StatsStore,
        teams: &HashMap<PlayerId, TeamId>,
        store: &mut WeightStore,
        player_id: PlayerId,
        mode: LearnMode,
    ) -> Result<Result<PlayerUpdates, SkipReason>> {
        let Some(&team_id) = teams.get(&player_id) else {
            return Ok(Err(SkipReason::Unmappable));
        };

        let logs = stats.logs_for_player(player_id)?;
        let games = match domain::build_game_records(&logs, team_id) {
            Ok(games) => games,
            Err(reason) => return Ok(Err(reason)),
        };

        Ok(weights::learn_player(store, &games, mode))
    }
}
