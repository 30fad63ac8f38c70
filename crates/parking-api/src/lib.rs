//! Parking API: HTTP endpoints over the allocation engine
pub mod config;
pub mod dto;
pub mod handlers;
pub mod metrics;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use parking_core::AllocationEngine;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub use config::AppConfig;
pub use metrics::ParkingMetrics;

/// Shared handles passed to every handler
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AllocationEngine>,
    pub metrics: Arc<ParkingMetrics>,
}

impl AppState {
    pub fn new(engine: AllocationEngine) -> Result<Self, prometheus::Error> {
        Ok(Self {
            engine: Arc::new(engine),
            metrics: Arc::new(ParkingMetrics::new()?),
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/park", post(handlers::park).fallback(handlers::post_only))
        .route("/unpark", post(handlers::unpark).fallback(handlers::post_only))
        .route("/available", get(handlers::available).fallback(handlers::get_only))
        .route("/search", get(handlers::search).fallback(handlers::get_only))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(middleware::request_id))
                .layer(TraceLayer::new_for_http())
                .layer(middleware::cors()),
        )
        .with_state(state)
}

pub async fn run(addr: &str, state: AppState) -> std::io::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Parking API listening on {}", addr);
    axum::serve(listener, app).await
}
