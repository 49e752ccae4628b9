use std::sync::Arc;

use axum::{routing::get, Router};

use crate::api::handlers::{get_blend, get_matchups, get_predictions, get_value_plays, get_weights, AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/predictions", get(get_predictions))
        .route("/api/matchups", get(get_matchups))
        .route("/api/value-plays", get(get_value_plays))
        .route("/api/weights", get(get_weights))
        .route("/api/blend", get(get_blend))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weights::{ContextKey, LocationContext, RoleCategory, StoreLayout, WeightEntry, WeightStore};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn state() -> Arc<AppState> {
        let mut store = WeightStore::new(StoreLayout::ByLocation);
        store.update(
            ContextKey::located(1610612744, LocationContext::Home, RoleCategory::Starter),
            WeightEntry::new(0.7, 0.3),
        );
        Arc::new(AppState {
            store,
            predictions: Vec::new(),
            schedule: Vec::new(),
        })
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = create_router(state())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null))
    }

    #[tokio::test]
    async fn test_blend_with_stored_weights() {
        let (status, body) = get_json("/api/blend?team=1610612744&role=starter&location=HOME&l3=20&l10=10").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["formWeight"], 0.7);
        assert!((body["predictedPts"].as_f64().unwrap() - 17.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_blend_requires_location_for_located_store() {
        let (status, _) = get_json("/api/blend?team=1610612744&role=STARTER&l3=20&l10=10").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_blend_rejects_unknown_role() {
        let (status, _) = get_json("/api/blend?team=1&role=sixth-man&location=HOME&l3=20&l10=10").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_weights_lists_entries() {
        let (status, body) = get_json("/api/weights").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["layout"], "by-location");
        assert_eq!(body["items"][0]["location"], "HOME");
        assert_eq!(body["items"][0]["role"], "STARTER");
    }
}
