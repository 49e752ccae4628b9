use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use log::debug;

use super::role::classify;
use super::store::WeightStore;
use super::types::{ContextKey, WeightEntry, MAX_WEIGHT, MIN_WEIGHT};
use crate::domain::GameRecord;
use crate::errors::{PassError, SkipReason};

pub const LEARNING_RATE: f64 = 0.01;

/// Games in the class (long) window.
pub const HISTORY_GAMES: usize = 10;
/// Most recent games in the form (short) window.
pub const FORM_GAMES: usize = 3;
/// History plus one target game.
pub const MIN_GAMES_FOR_UPDATE: usize = HISTORY_GAMES + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearnMode {
    /// Every target index from the first full window onwards.
    Replay,
    /// Only the most recent game.
    Daily,
}

impl fmt::Display for LearnMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LearnMode::Replay => f.write_str("REPLAY"),
            LearnMode::Daily => f.write_str("DAILY"),
        }
    }
}

impl FromStr for LearnMode {
    type Err = PassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replay" => Ok(LearnMode::Replay),
            "daily" => Ok(LearnMode::Daily),
            other => Err(PassError::Configuration(format!(
                "unknown learning mode '{other}' (expected replay or daily)"
            ))),
        }
    }
}

/// Form and class averages over a run of games.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormWindow {
    pub l3_avg: f64,
    pub l10_avg: f64,
    /// Mean minutes over the class window, ignoring games without minutes.
    pub avg_minutes: Option<f64>,
}

impl FormWindow {
    /// Training window: the `HISTORY_GAMES` games strictly before `target`.
    pub fn before(games: &[GameRecord], target: usize) -> Option<Self> {
        if target < HISTORY_GAMES || target >= games.len() {
            return None;
        }
        Some(Self::over(&games[target - HISTORY_GAMES..target]))
    }

    /// Inference window: the `HISTORY_GAMES` most recent games.
    pub fn latest(games: &[GameRecord]) -> Option<Self> {
        if games.len() < HISTORY_GAMES {
            return None;
        }
        Some(Self::over(&games[games.len() - HISTORY_GAMES..]))
    }

    fn over(history: &[GameRecord]) -> Self {
        let form = &history[history.len() - FORM_GAMES..];
        Self {
            l3_avg: mean(form.iter().map(|g| g.points)).unwrap_or(f64::NAN),
            l10_avg: mean(history.iter().map(|g| g.points)).unwrap_or(f64::NAN),
            avg_minutes: mean(history.iter().filter_map(|g| g.minutes)),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// One applied update, kept for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateEvent {
    pub key: ContextKey,
    pub target_index: usize,
    pub window: FormWindow,
    pub actual: f64,
    pub before: WeightEntry,
    pub after: WeightEntry,
}

/// Nudge the pair toward whichever average predicted `actual` better.
pub fn update(entry: WeightEntry, l3_avg: f64, l10_avg: f64, actual: f64) -> WeightEntry {
    let err_l3 = (actual - l3_avg).abs();
    let err_l10 = (actual - l10_avg).abs();

    let mut next = entry;
    if err_l3 < err_l10 {
        next.form_weight += LEARNING_RATE;
        next.class_weight -= LEARNING_RATE;
    } else if err_l10 < err_l3 {
        next.form_weight -= LEARNING_RATE;
        next.class_weight += LEARNING_RATE;
    }

    // Each side is clamped on its own; the pair is not renormalized.
    next.form_weight = next.form_weight.clamp(MIN_WEIGHT, MAX_WEIGHT);
    next.class_weight = next.class_weight.clamp(MIN_WEIGHT, MAX_WEIGHT);
    next
}

/// Target indices a mode visits for a player with `game_count` games.
pub fn target_indices(mode: LearnMode, game_count: usize) -> Range<usize> {
    if game_count < MIN_GAMES_FOR_UPDATE {
        return 0..0;
    }
    match mode {
        LearnMode::Replay => HISTORY_GAMES..game_count,
        LearnMode::Daily => game_count - 1..game_count,
    }
}

/// Updates applied for one player, plus the target games that were passed
/// over because their home/away side is unknown.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerUpdates {
    pub events: Vec<UpdateEvent>,
    pub unlocated: Vec<usize>,
}

/// Apply every update `mode` calls for over one player's games, oldest first.
///
/// `games` must be sorted ascending by date and belong to a single player.
/// In a location-aware store a target game without a home/away side is left
/// out and reported in `unlocated`; the remaining targets still apply in order.
pub fn learn_player(
    store: &mut WeightStore,
    games: &[GameRecord],
    mode: LearnMode,
) -> Result<PlayerUpdates, SkipReason> {
    if games.len() < MIN_GAMES_FOR_UPDATE {
        return Err(SkipReason::InsufficientHistory {
            games: games.len(),
            required: MIN_GAMES_FOR_UPDATE,
        });
    }

    let mut outcome = PlayerUpdates::default();
    for target_index in target_indices(mode, games.len()) {
        let Some(window) = FormWindow::before(games, target_index) else {
            continue;
        };
        let target = &games[target_index];
        let role = classify(window.avg_minutes);
        let Some(key) = store.key(target.team_id, target.location, role) else {
            debug!("No home/away side for game on {}, skipping update", target.date);
            outcome.unlocated.push(target_index);
            continue;
        };

        let actual = target.points;
        let before = store.ensure(key);
        let after = update(before, window.l3_avg, window.l10_avg, actual);
        store.update(key, after);

        debug!(
            "{} game {}: L3 {:.1} L10 {:.1} actual {:.1} -> form {:.2}",
            key, target_index, window.l3_avg, window.l10_avg, actual, after.form_weight
        );
        outcome.events.push(UpdateEvent {
            key,
            target_index,
            window,
            actual,
            before,
            after,
        });
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weights::{LocationContext, RoleCategory, StoreLayout};
    use chrono::{Duration, NaiveDate};

    const TEAM: i64 = 1610612744;

    fn games_with(points: &[f64], minutes: f64) -> Vec<GameRecord> {
        let start = NaiveDate::from_ymd_opt(2025, 10, 21).unwrap();
        points
            .iter()
            .enumerate()
            .map(|(i, &pts)| GameRecord {
                player_id: 201939,
                team_id: TEAM,
                date: start + Duration::days(i as i64 * 2),
                location: Some(if i % 2 == 0 {
                    LocationContext::Home
                } else {
                    LocationContext::Away
                }),
                points: pts,
                rebounds: Some(5.0),
                minutes: Some(minutes),
            })
            .collect()
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_form_better_moves_toward_form() {
        let after = update(WeightEntry::default(), 20.0, 10.0, 21.0);
        assert_close(after.form_weight, 0.51);
        assert_close(after.class_weight, 0.49);
    }

    #[test]
    fn test_class_better_moves_toward_class() {
        let after = update(WeightEntry::default(), 20.0, 10.0, 9.0);
        assert_close(after.form_weight, 0.49);
        assert_close(after.class_weight, 0.51);
    }

    #[test]
    fn test_tie_leaves_entry_unchanged() {
        let entry = WeightEntry::new(0.63, 0.37);
        assert_eq!(update(entry, 12.0, 18.0, 15.0), entry);
    }

    #[test]
    fn test_clamp_invariant_holds_under_long_runs() {
        let mut entry = WeightEntry::default();
        for _ in 0..100 {
            entry = update(entry, 30.0, 10.0, 31.0);
            assert!((MIN_WEIGHT..=MAX_WEIGHT).contains(&entry.form_weight));
            assert!((MIN_WEIGHT..=MAX_WEIGHT).contains(&entry.class_weight));
        }
        assert_eq!(entry.form_weight, MAX_WEIGHT);
        assert_eq!(entry.class_weight, MIN_WEIGHT);
        assert!((entry.sum() - 1.0).abs() < 1e-9);

        for _ in 0..100 {
            entry = update(entry, 30.0, 10.0, 9.0);
            assert!((MIN_WEIGHT..=MAX_WEIGHT).contains(&entry.form_weight));
            assert!((MIN_WEIGHT..=MAX_WEIGHT).contains(&entry.class_weight));
        }
        assert_eq!(entry.form_weight, MIN_WEIGHT);
        assert_eq!(entry.class_weight, MAX_WEIGHT);
    }

    #[test]
    fn test_monotonic_direction_when_form_wins() {
        for start in [0.1, 0.35, 0.5, 0.89, 0.9] {
            let before = WeightEntry::new(start, 1.0 - start);
            let after = update(before, 25.0, 15.0, 26.0);
            assert!(after.form_weight >= before.form_weight);
        }
        let pinned = WeightEntry::new(0.9, 0.1);
        assert_eq!(update(pinned, 25.0, 15.0, 26.0), pinned);
    }

    #[test]
    fn test_independent_clamp_does_not_renormalize() {
        // A drifted pair from a hand-edited file: the form side stays pinned at
        // the ceiling while the class side keeps moving, so the sum drifts.
        let drifted = WeightEntry::new(0.9, 0.3);
        let after = update(drifted, 25.0, 15.0, 26.0);
        assert_eq!(after.form_weight, 0.9);
        assert_close(after.class_weight, 0.29);
        assert_close(after.sum(), 1.19);
    }

    #[test]
    fn test_target_indices_per_mode() {
        assert_eq!(target_indices(LearnMode::Replay, 10), 0..0);
        assert_eq!(target_indices(LearnMode::Daily, 10), 0..0);
        assert_eq!(target_indices(LearnMode::Replay, 11), 10..11);
        assert_eq!(target_indices(LearnMode::Replay, 21), 10..21);
        assert_eq!(target_indices(LearnMode::Daily, 21), 20..21);
    }

    #[test]
    fn test_eleven_games_reads_the_right_windows() {
        let points: Vec<f64> = (1..=11).map(|p| p as f64).collect();
        let games = games_with(&points, 30.0);
        let mut store = WeightStore::new(StoreLayout::Flat);

        let events = learn_player(&mut store, &games, LearnMode::Replay).unwrap().events;

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.target_index, 10);
        // History is games[0..10] = 1..=10; form window is 8, 9, 10.
        assert_close(event.window.l3_avg, 9.0);
        assert_close(event.window.l10_avg, 5.5);
        assert_close(event.window.avg_minutes.unwrap(), 30.0);
        assert_close(event.actual, 11.0);
        assert_eq!(event.key, ContextKey::flat(TEAM, RoleCategory::Starter));
        assert_close(event.after.form_weight, 0.51);
    }

    #[test]
    fn test_replay_threads_state_across_updates() {
        let points: Vec<f64> = (0..21).map(|p| p as f64).collect();
        let games = games_with(&points, 32.0);
        let mut store = WeightStore::new(StoreLayout::Flat);

        let events = learn_player(&mut store, &games, LearnMode::Replay).unwrap().events;

        assert_eq!(events.len(), 11);
        let indices: Vec<usize> = events.iter().map(|e| e.target_index).collect();
        assert_eq!(indices, (10..21).collect::<Vec<_>>());
        for pair in events.windows(2) {
            assert_eq!(pair[1].before, pair[0].after);
        }

        let key = ContextKey::flat(TEAM, RoleCategory::Starter);
        assert_close(store.get(key).form_weight, 0.61);
        assert_close(store.get(key).class_weight, 0.39);
    }

    #[test]
    fn test_location_layout_splits_home_and_away() {
        let points: Vec<f64> = (0..21).map(|p| p as f64).collect();
        let games = games_with(&points, 32.0);
        let mut store = WeightStore::new(StoreLayout::ByLocation);

        learn_player(&mut store, &games, LearnMode::Replay).unwrap();

        let home = ContextKey::located(TEAM, LocationContext::Home, RoleCategory::Starter);
        let away = ContextKey::located(TEAM, LocationContext::Away, RoleCategory::Starter);
        // Even targets 10..=20 are home (6), odd targets away (5).
        assert_close(store.get(home).form_weight, 0.56);
        assert_close(store.get(away).form_weight, 0.55);
    }

    #[test]
    fn test_daily_uses_only_latest_game() {
        let points: Vec<f64> = (0..15).map(|p| p as f64).collect();
        let games = games_with(&points, 12.0);
        let mut store = WeightStore::new(StoreLayout::Flat);

        let events = learn_player(&mut store, &games, LearnMode::Daily).unwrap().events;

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].target_index, 14);
        assert_eq!(events[0].key.role, RoleCategory::Bench);
    }

    #[test]
    fn test_daily_tie_is_a_no_op() {
        let games = games_with(&[10.0; 12], 30.0);
        let mut store = WeightStore::new(StoreLayout::Flat);
        let key = ContextKey::flat(TEAM, RoleCategory::Starter);
        store.update(key, WeightEntry::new(0.58, 0.42));

        let events = learn_player(&mut store, &games, LearnMode::Daily).unwrap().events;

        assert_eq!(events.len(), 1);
        assert_eq!(store.get(key), WeightEntry::new(0.58, 0.42));
    }

    #[test]
    fn test_short_history_is_skipped() {
        let games = games_with(&[10.0; 10], 30.0);
        let mut store = WeightStore::new(StoreLayout::Flat);

        let result = learn_player(&mut store, &games, LearnMode::Replay);

        assert_eq!(
            result,
            Err(SkipReason::InsufficientHistory {
                games: 10,
                required: 11
            })
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_missing_location_skips_only_that_update() {
        let points: Vec<f64> = (0..21).map(|p| p as f64).collect();
        let mut games = games_with(&points, 30.0);
        for game in &mut games {
            game.location = Some(LocationContext::Home);
        }
        games[15].location = None;
        let mut store = WeightStore::new(StoreLayout::ByLocation);

        let outcome = learn_player(&mut store, &games, LearnMode::Replay).unwrap();

        assert_eq!(outcome.unlocated, vec![15]);
        assert_eq!(outcome.events.len(), 10);
        let indices: Vec<usize> = outcome.events.iter().map(|e| e.target_index).collect();
        assert_eq!(indices, vec![10, 11, 12, 13, 14, 16, 17, 18, 19, 20]);

        let home = ContextKey::located(TEAM, LocationContext::Home, RoleCategory::Starter);
        assert_eq!(store.len(), 1);
        assert_close(store.get(home).form_weight, 0.60);
    }

    #[test]
    fn test_daily_without_location_applies_nothing() {
        let points: Vec<f64> = (0..12).map(|p| p as f64).collect();
        let mut games = games_with(&points, 30.0);
        games[11].location = None;
        let mut store = WeightStore::new(StoreLayout::ByLocation);

        let outcome = learn_player(&mut store, &games, LearnMode::Daily).unwrap();

        assert!(outcome.events.is_empty());
        assert_eq!(outcome.unlocated, vec![11]);
        assert!(store.is_empty());
    }

    #[test]
    fn test_flat_store_ignores_missing_location() {
        let mut games = games_with(&[10.0; 12], 30.0);
        games[11].location = None;
        let mut store = WeightStore::new(StoreLayout::Flat);

        let outcome = learn_player(&mut store, &games, LearnMode::Daily).unwrap();

        assert_eq!(outcome.events.len(), 1);
        assert!(outcome.unlocated.is_empty());
    }

    #[test]
    fn test_unknown_minutes_fall_back_to_bench() {
        let mut games = games_with(&[20.0; 11], 35.0);
        for game in &mut games {
            game.minutes = None;
        }
        let mut store = WeightStore::new(StoreLayout::Flat);

        let events = learn_player(&mut store, &games, LearnMode::Daily).unwrap().events;
        assert_eq!(events[0].key.role, RoleCategory::Bench);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("replay".parse::<LearnMode>().unwrap(), LearnMode::Replay);
        assert_eq!("DAILY".parse::<LearnMode>().unwrap(), LearnMode::Daily);
        assert!(matches!(
            "weekly".parse::<LearnMode>(),
            Err(PassError::Configuration(_))
        ));
    }
}
