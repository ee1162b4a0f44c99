// Presentation layer - HTTP routes and the page shell
pub mod app_state;
pub mod handlers;
pub mod page;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    dashboard_snapshot, health, health_check, index, post_event, predict, stream_dashboard,
};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    // Snapshots are compressed by their own response builder and the stream
    // stays uncompressed so each line is flushed as soon as it is written.
    // Only the page shell goes through the compression layer.
    Router::new()
        .route("/", get(index).layer(CompressionLayer::new()))
        .route("/api/dashboard", get(dashboard_snapshot))
        .route("/api/dashboard/stream", get(stream_dashboard))
        .route("/api/events", post(post_event))
        .route("/predict", post(predict))
        .route("/health", get(health))
        .route("/healthz", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
