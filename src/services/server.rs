use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use log::{info, warn};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::api::handlers::AppState;
use crate::api::routes::create_router;
use crate::config::AppConfig;
use crate::records::load_predictions;
use crate::sources;
use crate::weights::WeightStore;

pub struct ServerService {
    port: u16,
    config: AppConfig,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig) -> Self {
        Self { port, config }
    }

    pub async fn run(&self) -> Result<()> {
        let state = Arc::new(load_state(&self.config)?);
        info!(
            "Serving {} predictions and {} weight entries",
            state.predictions.len(),
            state.store.len()
        );

        let app = build_app(state);

        let addr = SocketAddr::from((self.config.server.host, self.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Router with request logging and permissive CORS.
pub fn build_app(state: Arc<AppState>) -> Router {
    create_router(state).layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn(log_request))
            .layer(CorsLayer::permissive()),
    )
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    info!(
        "{} {} -> {} ({} ms)",
        method,
        uri,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}

/// Everything the API serves, loaded once at startup and never written.
pub fn load_state(config: &AppConfig) -> Result<AppState> {
    let paths = &config.paths;
    let store = WeightStore::load(&paths.weights_file, config.learning.layout())?;
    let schedule = sources::load_schedule(&paths.schedule_csv)?;

    let predictions = if paths.latest_predictions.is_file() {
        load_predictions(&paths.latest_predictions)?
    } else {
        warn!("No predictions at {}, serving an empty list", paths.latest_predictions.display());
        Vec::new()
    };

    Ok(AppState {
        store,
        predictions,
        schedule,
    })
}
