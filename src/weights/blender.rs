use std::collections::HashMap;

use super::store::WeightStore;
use super::types::{ContextKey, LocationContext, WeightEntry};
use crate::domain::{ScheduledGame, TeamId};

/// Blend the form and class averages with the weights stored for `key`.
///
/// Unseen keys blend with the default pair; the store is never modified.
pub fn predict(l3_avg: f64, l10_avg: f64, store: &WeightStore, key: ContextKey) -> f64 {
    blend(l3_avg, l10_avg, store.get(key))
}

pub fn blend(l3_avg: f64, l10_avg: f64, entry: WeightEntry) -> f64 {
    l3_avg * entry.form_weight + l10_avg * entry.class_weight
}

/// Home/away side of each team for one prediction batch.
#[derive(Debug, Clone, Default)]
pub struct LocationResolver {
    sides: HashMap<TeamId, LocationContext>,
}

impl LocationResolver {
    pub fn from_schedule(games: &[ScheduledGame]) -> Self {
        let mut sides = HashMap::new();
        for game in games {
            sides.entry(game.home_team_id).or_insert(LocationContext::Home);
            sides.entry(game.visitor_team_id).or_insert(LocationContext::Away);
        }
        Self { sides }
    }

    /// Teams missing from the schedule resolve to `Home`.
    pub fn resolve(&self, team_id: TeamId) -> LocationContext {
        self.sides.get(&team_id).copied().unwrap_or(LocationContext::Home)
    }

    pub fn is_scheduled(&self, team_id: TeamId) -> bool {
        self.sides.contains_key(&team_id)
    }
}
