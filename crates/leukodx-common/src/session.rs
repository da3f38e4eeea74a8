//! Session-lifetime context: feature order, diagnostic cutoff, and the
//! background population.
//!
//! All three are loaded once at startup and injected into every pipeline
//! call; nothing mutates them afterwards. A load failure is a
//! `ResourceLoad` error and disables prediction for the whole session.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{LeukodxError, Result};
use crate::observation::DiagnosisLabel;

/// One background patient: model score plus adjudicated diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationRecord {
    pub probability: f64,
    pub label: DiagnosisLabel,
}

/// Immutable per-session context for the prediction pipeline.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Exact positional layout the classifier expects.
    pub feature_order: Vec<String>,
    /// Decision threshold on the positive-class probability.
    pub cutoff: f64,
    /// Fixed background set used for the comparison plot.
    pub population: Vec<PopulationRecord>,
}

/// On-disk layout of the population document.
#[derive(Debug, Deserialize)]
struct PopulationFile {
    cutoff: f64,
    background_predictions: Vec<f64>,
    background_diagnoses: Vec<u8>,
}

impl SessionContext {
    pub fn new(feature_order: Vec<String>, cutoff: f64, population: Vec<PopulationRecord>) -> Self {
        Self { feature_order, cutoff, population }
    }

    /// Load the session context from the two startup resources.
    pub fn load(feature_order_path: impl AsRef<Path>, population_path: impl AsRef<Path>) -> Result<Self> {
        let feature_order = load_feature_order(feature_order_path.as_ref())?;
        let (cutoff, population) = load_population(population_path.as_ref())?;
        info!(
            "Session context loaded: {} features, cutoff {:.3}, {} background patients",
            feature_order.len(),
            cutoff,
            population.len()
        );
        Ok(Self { feature_order, cutoff, population })
    }
}

fn load_feature_order(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| LeukodxError::ResourceLoad(format!("{}: {}", path.display(), e)))?;

    let names: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();

    if names.is_empty() {
        return Err(LeukodxError::ResourceLoad(format!(
            "{}: feature order file contains no feature names",
            path.display()
        )));
    }
    Ok(names)
}

fn load_population(path: &Path) -> Result<(f64, Vec<PopulationRecord>)> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| LeukodxError::ResourceLoad(format!("{}: {}", path.display(), e)))?;

    let file: PopulationFile = serde_json::from_str(&text)
        .map_err(|e| LeukodxError::ResourceLoad(format!("{}: {}", path.display(), e)))?;

    // Predictions and diagnoses are positionally paired; a length mismatch
    // would silently misalign the plot.
    if file.background_predictions.len() != file.background_diagnoses.len() {
        return Err(LeukodxError::ResourceLoad(format!(
            "{}: {} background_predictions vs {} background_diagnoses",
            path.display(),
            file.background_predictions.len(),
            file.background_diagnoses.len()
        )));
    }

    if !(0.0..=1.0).contains(&file.cutoff) {
        return Err(LeukodxError::ResourceLoad(format!(
            "{}: cutoff {} is outside [0, 1]",
            path.display(),
            file.cutoff
        )));
    }

    let mut population = Vec::with_capacity(file.background_predictions.len());
    for (i, (&probability, &code)) in file
        .background_predictions
        .iter()
        .zip(file.background_diagnoses.iter())
        .enumerate()
    {
        if !(0.0..=1.0).contains(&probability) {
            return Err(LeukodxError::ResourceLoad(format!(
                "{}: background_predictions[{}] = {} is outside [0, 1]",
                path.display(),
                i,
                probability
            )));
        }
        let label = DiagnosisLabel::from_code(code).ok_or_else(|| {
            LeukodxError::ResourceLoad(format!(
                "{}: background_diagnoses[{}] = {} is not 0 or 1",
                path.display(),
                i,
                code
            ))
        })?;
        population.push(PopulationRecord { probability, label });
    }

    Ok((file.cutoff, population))
}
