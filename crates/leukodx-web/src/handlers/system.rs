//! Readiness endpoint — the form keeps its trigger disabled until this
//! reports ready.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /api/status
pub async fn status(State(state): State<SharedState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        ready: state.is_ready(),
        features: state.session.as_ref().map(|s| s.feature_order.len()),
        population_size: state.session.as_ref().map(|s| s.population.len()),
        error: state.init_error.clone(),
    })
}
