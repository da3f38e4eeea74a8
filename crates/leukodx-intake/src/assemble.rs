//! Feature-vector assembly in the exact order the classifier expects.

use std::collections::HashMap;

use thiserror::Error;

use leukodx_common::ObservationVector;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssembleError {
    #[error("Input field missing: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: '{raw}'")]
    InvalidValue { field: String, raw: String },
}

/// Read each field named by `feature_order`, in that exact order, into an
/// observation vector. Both failure modes are checked before inference is
/// ever invoked — no partial vectors are submitted.
pub fn assemble_observation(
    feature_order: &[String],
    fields: &HashMap<String, String>,
) -> Result<ObservationVector, AssembleError> {
    let mut values = Vec::with_capacity(feature_order.len());

    for name in feature_order {
        let raw = fields
            .get(name)
            .ok_or_else(|| AssembleError::MissingField(name.clone()))?;
        let value = raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| AssembleError::InvalidValue {
                field: name.clone(),
                raw: raw.clone(),
            })?;
        values.push(value);
    }

    Ok(ObservationVector::new(values))
}
