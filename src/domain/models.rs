use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::weights::{LocationContext, RoleCategory};

pub type PlayerId = i64;
pub type TeamId = i64;

/// One player's box score for one date, joined with the player's team.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub date: NaiveDate,
    /// Home/away side of this game, when the matchup string was readable.
    pub location: Option<LocationContext>,
    pub points: f64,
    pub rebounds: Option<f64>,
    pub minutes: Option<f64>,
}

/// Roster row as written by the roster fetcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(rename = "TeamID", alias = "TEAMID", alias = "TEAM_ID")]
    pub team_id: TeamId,
    #[serde(rename = "PLAYER", alias = "Player")]
    pub player_name: String,
    #[serde(rename = "PLAYER_ID", alias = "Player_ID")]
    pub player_id: PlayerId,
    #[serde(rename = "POSITION", default)]
    pub position: Option<String>,
}

/// One game on the day's schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledGame {
    #[serde(rename = "GAME_ID")]
    pub game_id: String,
    #[serde(rename = "HOME_TEAM_ID")]
    pub home_team_id: TeamId,
    #[serde(rename = "VISITOR_TEAM_ID")]
    pub visitor_team_id: TeamId,
}

/// Blender output for one roster player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "TeamID")]
    pub team_id: TeamId,
    #[serde(rename = "Predicted_PTS")]
    pub predicted_pts: f64,
    #[serde(rename = "Role")]
    pub role: RoleCategory,
    #[serde(rename = "L3")]
    pub l3: f64,
    #[serde(rename = "L10")]
    pub l10: f64,
    #[serde(rename = "Weight_Form")]
    pub weight_form: f64,
}

/// Home/away side from a game-log matchup such as `"LAL vs. BOS"` or `"LAL @ BOS"`.
pub fn location_from_matchup(matchup: &str) -> Option<LocationContext> {
    if matchup.contains('@') {
        Some(LocationContext::Away)
    } else if matchup.contains("vs") {
        Some(LocationContext::Home)
    } else {
        None
    }
}
