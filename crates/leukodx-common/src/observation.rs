//! Core observation and prediction types.

use serde::{Deserialize, Serialize};

/// Fixed-length numeric vector in classifier feature order.
///
/// Built fresh for each prediction request and never mutated after
/// construction; the classifier consumes it and the next request builds a
/// new one.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationVector(Vec<f64>);

impl ObservationVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Values narrowed to f32 for the runtime's input tensor.
    pub fn as_f32(&self) -> Vec<f32> {
        self.0.iter().map(|&v| v as f32).collect()
    }
}

/// Two-class output pair from the classifier, summing to 1 within
/// floating-point tolerance. Class 0 = leukemoid reaction, class 1 =
/// myeloid malignancy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub negative: f64,
    pub positive: f64,
}

/// Final categorical diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosisLabel {
    MyeloidMalignancy,
    LeukemoidReaction,
}

impl DiagnosisLabel {
    /// Decode the 0/1 convention used by the background-population file.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::LeukemoidReaction),
            1 => Some(Self::MyeloidMalignancy),
            _ => None,
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Self::MyeloidMalignancy)
    }
}

impl std::fmt::Display for DiagnosisLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MyeloidMalignancy => write!(f, "Myeloid Malignancy"),
            Self::LeukemoidReaction => write!(f, "Leukemoid Reaction"),
        }
    }
}
