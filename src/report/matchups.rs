use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{PredictionRecord, ScheduledGame, TeamId};

/// Players counted toward a team's projected score.
pub const ROTATION_SIZE: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupProjection {
    pub game_id: String,
    pub home_team_id: TeamId,
    pub visitor_team_id: TeamId,
    pub home_score: f64,
    pub visitor_score: f64,
    pub winner_team_id: TeamId,
    pub spread: f64,
}

/// Sum of the top `ROTATION_SIZE` projections for `team_id`.
pub fn team_score(predictions: &[PredictionRecord], team_id: TeamId) -> f64 {
    let mut points: Vec<f64> = predictions
        .iter()
        .filter(|p| p.team_id == team_id)
        .map(|p| p.predicted_pts)
        .collect();
    points.sort_by(|a, b| b.total_cmp(a));
    points.iter().take(ROTATION_SIZE).sum()
}

pub fn project_matchups(schedule: &[ScheduledGame], predictions: &[PredictionRecord]) -> Vec<MatchupProjection> {
    let mut scores: HashMap<TeamId, f64> = HashMap::new();
    let mut score_for = |team_id| *scores.entry(team_id).or_insert_with(|| team_score(predictions, team_id));

    schedule
        .iter()
        .map(|game| {
            let home_score = score_for(game.home_team_id);
            let visitor_score = score_for(game.visitor_team_id);
            // Ties go to the visitor.
            let winner_team_id = if home_score > visitor_score {
                game.home_team_id
            } else {
                game.visitor_team_id
            };

            MatchupProjection {
                game_id: game.game_id.clone(),
                home_team_id: game.home_team_id,
                visitor_team_id: game.visitor_team_id,
                home_score,
                visitor_score,
                winner_team_id,
                spread: (home_score - visitor_score).abs(),
            }
        })
        .collect()
}
