use serde::Serialize;

use crate::domain::{PredictionRecord, TeamId};

pub const VALUE_PLAY_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuePlay {
    pub player: String,
    pub team_id: TeamId,
    pub predicted_pts: f64,
    pub l3: f64,
    pub diff: f64,
}

/// Players projected furthest above (`buy`) and below (`sell`) their recent form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuePlays {
    pub buy: Vec<ValuePlay>,
    pub sell: Vec<ValuePlay>,
}

pub fn value_plays(predictions: &[PredictionRecord], count: usize) -> ValuePlays {
    let mut plays: Vec<ValuePlay> = predictions
        .iter()
        .map(|p| ValuePlay {
            player: p.player.clone(),
            team_id: p.team_id,
            predicted_pts: p.predicted_pts,
            l3: p.l3,
            diff: p.predicted_pts - p.l3,
        })
        .collect();
    plays.sort_by(|a, b| b.diff.total_cmp(&a.diff));

    let buy = plays.iter().take(count).cloned().collect();
    let sell = plays.iter().rev().take(count).cloned().collect();

    ValuePlays { buy, sell }
}
