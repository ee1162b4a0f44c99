// HTTP request handlers
use crate::application::controller::UiEvent;
use crate::application::risk_prediction;
use crate::infrastructure::chunked_json::{ndjson_response, snapshot_stream};
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::page::render_page;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use chrono::Local;
use serde_json::{json, Value};
use std::sync::Arc;

/// Liveness probe
pub async fn health_check() -> &'static str {
    "ok"
}

/// Component status
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let running = state.controller.is_running();
    Json(json!({
        "status": if running { "healthy" } else { "degraded" },
        "data_source": state.data_source,
        "controller": if running { "running" } else { "stopped" },
        "timestamp": Local::now().to_rfc3339(),
    }))
}

/// Page shell. Effects already in the page model count as seen by this load.
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page(state.page.snapshot().replay_cursor()).into_string())
}

/// Current page snapshot
pub async fn dashboard_snapshot(headers: HeaderMap, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let compress = accepts_brotli(&headers);

    match json_response(&state.page.snapshot(), compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Snapshot per page change, as NDJSON
pub async fn stream_dashboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ndjson_response(snapshot_stream(state.page.clone(), state.closing.clone()))
}

pub async fn post_event(State(state): State<Arc<AppState>>, Json(event): Json<UiEvent>) -> impl IntoResponse {
    tracing::debug!("UI event: {:?}", event);
    match state.controller.dispatch(event).await {
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(e) => {
            tracing::warn!("Dropping UI event: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}

/// Attrition-risk prediction for one employee. An unreadable body is
/// treated the same as a body without `employee_id`.
pub async fn predict(body: Bytes) -> impl IntoResponse {
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    match risk_prediction::predict(&body) {
        Ok(prediction) => (StatusCode::OK, Json(prediction)).into_response(),
        Err(e) => (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))).into_response(),
    }
}
