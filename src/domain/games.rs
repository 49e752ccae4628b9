use chrono::{NaiveDate, NaiveDateTime};

use super::models::{location_from_matchup, GameRecord, TeamId};
use crate::database::DbPlayerLog;
use crate::errors::SkipReason;

/// Join a player's raw logs with their team and order them oldest first.
pub fn build_game_records(logs: &[DbPlayerLog], team_id: TeamId) -> Result<Vec<GameRecord>, SkipReason> {
    let mut records = logs
        .iter()
        .map(|log| to_game_record(log, team_id))
        .collect::<Result<Vec<_>, _>>()?;

    // Stable, so same-day rows keep their stored order.
    records.sort_by_key(|record| record.date);
    Ok(records)
}

fn to_game_record(log: &DbPlayerLog, team_id: TeamId) -> Result<GameRecord, SkipReason> {
    let date = parse_game_date(&log.game_date).ok_or_else(|| {
        SkipReason::Malformed(format!("unreadable game date '{}'", log.game_date))
    })?;

    Ok(GameRecord {
        player_id: log.player_id,
        team_id,
        date,
        location: log.matchup.as_deref().and_then(location_from_matchup),
        points: log.points,
        rebounds: log.rebounds,
        minutes: log.minutes,
    })
}

/// Accepts ISO dates, ISO timestamps and the `"OCT 22, 2024"` form used by game logs.
pub fn parse_game_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }

    NaiveDate::parse_from_str(raw, "%b %d, %Y").ok()
}
