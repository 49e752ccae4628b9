use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::types::{ContextKey, LocationContext, RoleCategory, WeightEntry};
use crate::domain::TeamId;
use crate::errors::{write_context, PassError};
use crate::persist;

/// Shape of the persisted document below each team key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StoreLayout {
    /// team -> role -> entry
    Flat,
    /// team -> HOME/AWAY -> role -> entry
    ByLocation,
}

impl fmt::Display for StoreLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreLayout::Flat => f.write_str("flat"),
            StoreLayout::ByLocation => f.write_str("by-location"),
        }
    }
}

type RoleWeights = BTreeMap<RoleCategory, WeightEntry>;

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum TeamDocument {
    ByLocation(BTreeMap<LocationContext, RoleWeights>),
    Flat(RoleWeights),
}

type WeightsDocument = BTreeMap<TeamId, TeamDocument>;

/// Blend weights for every context seen so far.
///
/// Mutated only through [`WeightStore::ensure`], [`WeightStore::update`] and
/// persisted with [`WeightStore::save`].
#[derive(Debug, Clone)]
pub struct WeightStore {
    layout: StoreLayout,
    entries: BTreeMap<ContextKey, WeightEntry>,
}

impl WeightStore {
    pub fn new(layout: StoreLayout) -> Self {
        Self {
            layout,
            entries: BTreeMap::new(),
        }
    }

    /// Load the persisted store. A missing or unreadable file is an empty store;
    /// content that is not valid UTF-8, JSON or a weights document is fatal.
    pub fn load<P: AsRef<Path>>(path: P, layout: StoreLayout) -> Result<Self> {
        let path = path.as_ref();

        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No weights file at {}, starting from defaults", path.display());
                return Ok(Self::new(layout));
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(PassError::malformed(path, e.to_string()).into());
            }
            Err(e) => {
                warn!("Cannot read weights file {} ({}), starting from defaults", path.display(), e);
                return Ok(Self::new(layout));
            }
        };

        let store = Self::from_json(&json, layout, path)?;

        info!(
            "Loaded {} weight entries ({} layout) from {}",
            store.len(),
            store.layout,
            path.display()
        );
        Ok(store)
    }

    fn from_json(json: &str, layout: StoreLayout, path: &Path) -> Result<Self, PassError> {
        let document: WeightsDocument =
            serde_json::from_str(json).map_err(|e| PassError::malformed(path, e.to_string()))?;

        let mut detected: Option<StoreLayout> = None;
        let mut entries = BTreeMap::new();

        for (team_id, team) in document {
            let team_layout = match &team {
                TeamDocument::ByLocation(map) if map.is_empty() => continue,
                TeamDocument::Flat(map) if map.is_empty() => continue,
                TeamDocument::ByLocation(_) => StoreLayout::ByLocation,
                TeamDocument::Flat(_) => StoreLayout::Flat,
            };

            match detected {
                None => detected = Some(team_layout),
                Some(seen) if seen != team_layout => {
                    return Err(PassError::malformed(
                        path,
                        format!("team {team_id} uses the {team_layout} layout but earlier teams use {seen}"),
                    ));
                }
                Some(_) => {}
            }

            match team {
                TeamDocument::Flat(roles) => {
                    for (role, entry) in roles {
                        let key = ContextKey::flat(team_id, role);
                        check_entry(&key, &entry).map_err(|reason| PassError::malformed(path, reason))?;
                        entries.insert(key, entry);
                    }
                }
                TeamDocument::ByLocation(locations) => {
                    for (location, roles) in locations {
                        for (role, entry) in roles {
                            let key = ContextKey::located(team_id, location, role);
                            check_entry(&key, &entry)
                                .map_err(|reason| PassError::malformed(path, reason))?;
                            entries.insert(key, entry);
                        }
                    }
                }
            }
        }

        if let Some(found) = detected.filter(|found| *found != layout) {
            return Err(PassError::Configuration(format!(
                "weights file {} uses the {found} layout but the {layout} layout is configured",
                path.display()
            )));
        }

        Ok(Self { layout, entries })
    }

    pub fn layout(&self) -> StoreLayout {
        self.layout
    }

    /// Build the key this store uses for a context. Returns `None` when the
    /// store is location-aware and no location is known.
    pub fn key(
        &self,
        team_id: TeamId,
        location: Option<LocationContext>,
        role: RoleCategory,
    ) -> Option<ContextKey> {
        match self.layout {
            StoreLayout::Flat => Some(ContextKey::flat(team_id, role)),
            StoreLayout::ByLocation => {
                location.map(|location| ContextKey::located(team_id, location, role))
            }
        }
    }

    /// Existing entry for `key`, inserting the default when absent.
    pub fn ensure(&mut self, key: ContextKey) -> WeightEntry {
        *self.entries.entry(key).or_default()
    }

    /// Read-only lookup, defaulting without inserting.
    pub fn get(&self, key: ContextKey) -> WeightEntry {
        self.entries.get(&key).copied().unwrap_or_default()
    }

    pub fn contains(&self, key: ContextKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn update(&mut self, key: ContextKey, entry: WeightEntry) {
        self.entries.insert(key, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ContextKey, &WeightEntry)> {
        self.entries.iter()
    }

    /// Overwrite `path` with the whole store.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let document = self.to_document()?;
        let json = serde_json::to_string_pretty(&document).context("Failed to serialize weights")?;

        persist::write_atomic(path, json.as_bytes())
            .with_context(|| write_context("weights", path))?;

        info!("Saved {} weight entries to {}", self.len(), path.display());
        Ok(())
    }

    fn to_document(&self) -> Result<WeightsDocument> {
        let mut document = WeightsDocument::new();

        for (key, entry) in &self.entries {
            match (self.layout, key.location) {
                (StoreLayout::Flat, None) => {
                    let team = document
                        .entry(key.team_id)
                        .or_insert_with(|| TeamDocument::Flat(RoleWeights::new()));
                    if let TeamDocument::Flat(roles) = team {
                        roles.insert(key.role, *entry);
                    }
                }
                (StoreLayout::ByLocation, Some(location)) => {
                    let team = document
                        .entry(key.team_id)
                        .or_insert_with(|| TeamDocument::ByLocation(BTreeMap::new()));
                    if let TeamDocument::ByLocation(locations) = team {
                        locations.entry(location).or_default().insert(key.role, *entry);
                    }
                }
                (layout, _) => {
                    anyhow::bail!("context key {} does not fit the {} layout", key, layout)
                }
            }
        }

        Ok(document)
    }
}

fn check_entry(key: &ContextKey, entry: &WeightEntry) -> Result<(), String> {
    let in_range = |w: f64| w.is_finite() && (0.0..=1.0).contains(&w);
    if !in_range(entry.form_weight) || !in_range(entry.class_weight) {
        return Err(format!(
            "entry {} has weights outside [0, 1]: ({}, {})",
            key, entry.form_weight, entry.class_weight
        ));
    }
    if (entry.sum() - 1.0).abs() > 1e-6 {
        warn!(
            "Entry {} does not sum to 1.0 ({:.4} + {:.4})",
            key, entry.form_weight, entry.class_weight
        );
    }
    Ok(())
}
