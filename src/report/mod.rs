pub mod matchups;
pub mod value;

pub use matchups::{project_matchups, team_score, MatchupProjection, ROTATION_SIZE};
pub use value::{value_plays, ValuePlay, ValuePlays, VALUE_PLAY_COUNT};
