//! Reference-range API — drives form rendering and inline highlighting.

use axum::Json;
use serde::Serialize;

use leukodx_common::ranges::{ParameterSpec, REFERENCE_RANGES, WBC_FLOOR_FIELD, WBC_INTAKE_FLOOR};

#[derive(Debug, Serialize)]
pub struct RangesResponse {
    pub parameters: &'static [ParameterSpec],
    pub wbc_floor_field: &'static str,
    pub wbc_intake_floor: f64,
}

/// GET /api/ranges
pub async fn ranges() -> Json<RangesResponse> {
    Json(RangesResponse {
        parameters: &REFERENCE_RANGES,
        wbc_floor_field: WBC_FLOOR_FIELD,
        wbc_intake_floor: WBC_INTAKE_FLOOR,
    })
}
