pub mod injuries;
pub mod names;
pub mod roster;
pub mod schedule;

pub use injuries::InjuryReport;
pub use names::normalize_name;
pub use roster::{load_roster, team_map};
pub use schedule::load_schedule;
