use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::TeamId;

pub const DEFAULT_WEIGHT: f64 = 0.5;
pub const MIN_WEIGHT: f64 = 0.1;
pub const MAX_WEIGHT: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoleCategory {
    Starter,
    Bench,
}

impl RoleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleCategory::Starter => "STARTER",
            RoleCategory::Bench => "BENCH",
        }
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STARTER" => Ok(RoleCategory::Starter),
            "BENCH" => Ok(RoleCategory::Bench),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LocationContext {
    Home,
    Away,
}

impl LocationContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationContext::Home => "HOME",
            LocationContext::Away => "AWAY",
        }
    }
}

impl fmt::Display for LocationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HOME" => Ok(LocationContext::Home),
            "AWAY" => Ok(LocationContext::Away),
            other => Err(format!("unknown location '{other}'")),
        }
    }
}

/// Identity of one weight pair: team, optional home/away context, role.
///
/// The location is `None` for stores using the flat layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ContextKey {
    pub team_id: TeamId,
    pub location: Option<LocationContext>,
    pub role: RoleCategory,
}

impl ContextKey {
    pub fn flat(team_id: TeamId, role: RoleCategory) -> Self {
        Self {
            team_id,
            location: None,
            role,
        }
    }

    pub fn located(team_id: TeamId, location: LocationContext, role: RoleCategory) -> Self {
        Self {
            team_id,
            location: Some(location),
            role,
        }
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(location) => write!(f, "{}/{}/{}", self.team_id, location, self.role),
            None => write!(f, "{}/{}", self.team_id, self.role),
        }
    }
}

/// Blend pair applied to the form (L3) and class (L10) averages.
///
/// Field names on disk match the weight files written by earlier runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightEntry {
    #[serde(rename = "L3_Weight")]
    pub form_weight: f64,
    #[serde(rename = "L10_Weight")]
    pub class_weight: f64,
}

impl WeightEntry {
    pub fn new(form_weight: f64, class_weight: f64) -> Self {
        Self {
            form_weight,
            class_weight,
        }
    }

    pub fn sum(&self) -> f64 {
        self.form_weight + self.class_weight
    }
}

impl Default for WeightEntry {
    fn default() -> Self {
        Self::new(DEFAULT_WEIGHT, DEFAULT_WEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_entry_is_even_split() {
        let entry = WeightEntry::default();
        assert_eq!(entry.form_weight, 0.5);
        assert_eq!(entry.class_weight, 0.5);
        assert_eq!(entry.sum(), 1.0);
    }

    #[test]
    fn test_entry_uses_legacy_field_names() {
        let json = serde_json::to_string(&WeightEntry::new(0.6, 0.4)).unwrap();
        assert_eq!(json, r#"{"L3_Weight":0.6,"L10_Weight":0.4}"#);
    }

    #[test]
    fn test_entry_rejects_unknown_fields() {
        let parsed: Result<WeightEntry, _> =
            serde_json::from_str(r#"{"L3_Weight":0.6,"L10_Weight":0.4,"L5_Weight":0.1}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_key_display() {
        let flat = ContextKey::flat(1610612747, RoleCategory::Bench);
        let located = ContextKey::located(1610612747, LocationContext::Away, RoleCategory::Starter);
        assert_eq!(flat.to_string(), "1610612747/BENCH");
        assert_eq!(located.to_string(), "1610612747/AWAY/STARTER");
    }

    #[test]
    fn test_role_and_location_parse_case_insensitively() {
        assert_eq!("starter".parse::<RoleCategory>(), Ok(RoleCategory::Starter));
        assert_eq!(" Away ".parse::<LocationContext>(), Ok(LocationContext::Away));
        assert!("sixth-man".parse::<RoleCategory>().is_err());
    }
}
