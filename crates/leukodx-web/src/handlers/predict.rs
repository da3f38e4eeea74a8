//! Prediction API — runs the full pipeline for one submission.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::{error, warn};

use leukodx_common::error::ApiError;
use leukodx_model::ModelError;

use crate::pipeline::{run_prediction, PredictError, PredictOptions, Prediction};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// Raw form values, field name → text as entered.
    pub fields: HashMap<String, String>,
    #[serde(default = "default_true")]
    pub include_plot: bool,
    #[serde(default = "default_true")]
    pub include_findings: bool,
}

fn default_true() -> bool { true }

/// POST /api/predict
///
/// Every failure is converted here into a single user-visible message; the
/// busy slot is released on all paths so the trigger is usable again after
/// validation, computation, and structural failures alike. Only a startup
/// resource failure keeps prediction disabled, for the whole session.
pub async fn predict(
    State(state): State<SharedState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<Prediction>, ApiError> {
    let (session, classifier) = match (&state.session, &state.classifier) {
        (Some(session), Some(classifier)) => (Arc::clone(session), Arc::clone(classifier)),
        _ => {
            let detail = state
                .init_error
                .clone()
                .unwrap_or_else(|| "Application not initialized".to_string());
            return Err(ApiError::service_unavailable(format!("Initialization Error: {detail}")));
        }
    };

    let Some(_busy) = state.try_begin_prediction() else {
        return Err(ApiError::conflict("A prediction is already in flight"));
    };

    let options = PredictOptions {
        include_plot: request.include_plot,
        include_findings: request.include_findings,
    };

    match run_prediction(&session, classifier.as_ref(), &request.fields, options) {
        Ok(prediction) => Ok(Json(prediction)),
        Err(PredictError::Validation(report)) => {
            warn!("Submission rejected: {} invalid field(s)", report.issues.len());
            Err(ApiError::unprocessable("Invalid input detected")
                .with_details(serde_json::json!({ "issues": report.issues })))
        }
        Err(PredictError::Assemble(e)) => Err(ApiError::unprocessable(e.to_string())),
        Err(PredictError::Model(e)) => {
            error!("Inference failed: {e}");
            match e {
                ModelError::MissingTensor { .. }
                | ModelError::OutputShape { .. }
                | ModelError::FeatureCount { .. } => Err(ApiError::bad_gateway(e.to_string())),
                _ => Err(ApiError::internal(e.to_string())),
            }
        }
    }
}
