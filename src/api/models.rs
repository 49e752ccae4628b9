use serde::{Deserialize, Serialize};

use crate::domain::TeamId;
use crate::weights::{ContextKey, LocationContext, RoleCategory, WeightEntry};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightRow {
    pub team_id: TeamId,
    pub location: Option<LocationContext>,
    pub role: RoleCategory,
    pub form_weight: f64,
    pub class_weight: f64,
}

impl WeightRow {
    pub fn new(key: &ContextKey, entry: &WeightEntry) -> Self {
        Self {
            team_id: key.team_id,
            location: key.location,
            role: key.role,
            form_weight: entry.form_weight,
            class_weight: entry.class_weight,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightsResponse {
    pub layout: String,
    pub items: Vec<WeightRow>,
}

#[derive(Debug, Deserialize)]
pub struct BlendParams {
    pub team: TeamId,
    pub role: String,
    pub location: Option<String>,
    pub l3: f64,
    pub l10: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlendResponse {
    pub team_id: TeamId,
    pub location: Option<LocationContext>,
    pub role: RoleCategory,
    pub form_weight: f64,
    pub class_weight: f64,
    pub predicted_pts: f64,
}
