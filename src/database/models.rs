/// A `player_logs` row with the columns the engine reads.
#[derive(Debug, Clone, PartialEq)]
pub struct DbPlayerLog {
    pub player_id: i64,
    pub game_date: String,
    pub matchup: Option<String>,
    pub points: f64,
    pub rebounds: Option<f64>,
    /// Minutes played; `None` when missing or not numeric.
    pub minutes: Option<f64>,
}
