//! Metrics query handler

use application::MetricsSnapshot;
use axum::{Json, extract::State};

use crate::state::AppState;

/// Full metrics snapshot (`GET /metrics`)
///
/// Always succeeds; an untouched gateway returns empty maps.
pub async fn get_metrics(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}
