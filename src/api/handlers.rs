use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::api::models::{BlendParams, BlendResponse, WeightRow, WeightsResponse};
use crate::domain::{PredictionRecord, ScheduledGame};
use crate::report::{self, VALUE_PLAY_COUNT};
use crate::weights::{self, LocationContext, RoleCategory, WeightStore};

pub struct AppState {
    pub store: WeightStore,
    pub predictions: Vec<PredictionRecord>,
    pub schedule: Vec<ScheduledGame>,
}

pub async fn get_predictions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.predictions.clone())
}

pub async fn get_matchups(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(report::project_matchups(&state.schedule, &state.predictions))
}

pub async fn get_value_plays(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(report::value_plays(&state.predictions, VALUE_PLAY_COUNT))
}

pub async fn get_weights(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let items = state
        .store
        .iter()
        .map(|(key, entry)| WeightRow::new(key, entry))
        .collect();

    Json(WeightsResponse {
        layout: state.store.layout().to_string(),
        items,
    })
}

pub async fn get_blend(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BlendParams>,
) -> impl IntoResponse {
    let role = match params.role.parse::<RoleCategory>() {
        Ok(role) => role,
        Err(e) => return (StatusCode::BAD_REQUEST, e).into_response(),
    };

    let location = match params.location.as_deref().map(str::parse::<LocationContext>).transpose() {
        Ok(location) => location,
        Err(e) => return (StatusCode::BAD_REQUEST, e).into_response(),
    };

    let Some(key) = state.store.key(params.team, location, role) else {
        return (StatusCode::BAD_REQUEST, "location is required for location-aware weights").into_response();
    };

    let weight = state.store.get(key);
    Json(BlendResponse {
        team_id: key.team_id,
        location: key.location,
        role: key.role,
        form_weight: weight.form_weight,
        class_weight: weight.class_weight,
        predicted_pts: weights::predict(params.l3, params.l10, &state.store, key),
    })
    .into_response()
}
