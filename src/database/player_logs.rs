use anyhow::{Context, Result};
use rusqlite::params;
use rusqlite::types::Value;

use super::connection::DbConn;
use super::models::DbPlayerLog;

pub fn table_exists(conn: &mut DbConn) -> Result<bool> {
    let sql = "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'player_logs' COLLATE NOCASE";

    let count: i64 = conn
        .query_row(sql, [], |row| row.get(0))
        .context("Failed to inspect database tables")?;
    Ok(count > 0)
}

pub fn list_player_ids(conn: &mut DbConn) -> Result<Vec<i64>> {
    let sql = "SELECT DISTINCT PLAYER_ID FROM player_logs WHERE PTS IS NOT NULL ORDER BY PLAYER_ID";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<i64>>>()
        .context("Failed to list players in game logs")?;

    Ok(rows)
}

pub fn list_by_player(conn: &mut DbConn, player_id: i64) -> Result<Vec<DbPlayerLog>> {
    let sql = "SELECT PLAYER_ID, GAME_DATE, MATCHUP, PTS, REB, MIN FROM player_logs WHERE PLAYER_ID = ?1 AND PTS IS NOT NULL";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![player_id], parse_player_log_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .with_context(|| format!("Failed to read game logs for player {}", player_id))?;

    Ok(rows)
}

pub fn count_all(conn: &mut DbConn) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM player_logs", [], |row| row.get(0))
        .context("Failed to count game logs")
}

pub fn insert_log(conn: &mut DbConn, log: &DbPlayerLog) -> Result<()> {
    let sql = "INSERT INTO player_logs (PLAYER_ID, GAME_DATE, MATCHUP, PTS, REB, MIN) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

    conn.execute(
        sql,
        params![
            log.player_id,
            log.game_date,
            log.matchup,
            log.points,
            log.rebounds,
            log.minutes
        ],
    )
    .context("Failed to insert game log")
    .map(|_| ())
}

fn parse_player_log_row(row: &rusqlite::Row) -> rusqlite::Result<DbPlayerLog> {
    Ok(DbPlayerLog {
        player_id: row.get(0)?,
        game_date: row.get(1)?,
        matchup: row.get(2)?,
        points: row.get(3)?,
        rebounds: row.get(4)?,
        minutes: parse_minutes(row.get(5)?),
    })
}

/// Minutes arrive as numbers, numeric text or `"mm:ss"` depending on the source.
fn parse_minutes(value: Value) -> Option<f64> {
    match value {
        Value::Integer(i) => Some(i as f64),
        Value::Real(f) if f.is_finite() => Some(f),
        Value::Text(text) => parse_minutes_text(&text),
        _ => None,
    }
}

fn parse_minutes_text(text: &str) -> Option<f64> {
    let text = text.trim();
    if let Some((minutes, seconds)) = text.split_once(':') {
        let minutes: f64 = minutes.trim().parse().ok()?;
        let seconds: f64 = seconds.trim().parse().ok()?;
        return Some(minutes + seconds / 60.0);
    }
    text.parse::<f64>().ok().filter(|m| m.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minutes_variants() {
        assert_eq!(parse_minutes(Value::Integer(34)), Some(34.0));
        assert_eq!(parse_minutes(Value::Real(27.5)), Some(27.5));
        assert_eq!(parse_minutes(Value::Text("31".to_string())), Some(31.0));
        assert_eq!(parse_minutes(Value::Text("32:30".to_string())), Some(32.5));
        assert_eq!(parse_minutes(Value::Text("DNP".to_string())), None);
        assert_eq!(parse_minutes(Value::Null), None);
    }
}
