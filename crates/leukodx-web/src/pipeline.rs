//! The prediction pipeline:
//! validate → assemble → infer → decide → rank.
//!
//! One parameterized flow serves every surface. `PredictOptions` only
//! varies what the response carries — the computational contract is
//! identical across option settings.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info};

use leukodx_common::{DiagnosisLabel, SessionContext};
use leukodx_intake::{assemble_observation, validate_fields, AbnormalValue, AssembleError, ValidationReport};
use leukodx_model::{Classifier, ModelError};
use leukodx_ranker::{decide, prepare_plot, PlotSeries};

/// Presentation-layer switches; inference and decision are unaffected.
#[derive(Debug, Clone, Copy)]
pub struct PredictOptions {
    pub include_plot: bool,
    pub include_findings: bool,
}

impl Default for PredictOptions {
    fn default() -> Self {
        Self { include_plot: true, include_findings: true }
    }
}

/// Outcome of one prediction run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Positive-class (myeloid) probability.
    pub probability: f64,
    pub diagnosis: DiagnosisLabel,
    pub diagnosis_text: String,
    pub cutoff: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub findings: Option<Vec<AbnormalValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<PlotSeries>,
}

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("Invalid input detected")]
    Validation(ValidationReport),

    #[error(transparent)]
    Assemble(#[from] AssembleError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Run one full prediction over the submitted raw field values.
///
/// Validation failures stop the pipeline before the classifier is invoked;
/// the observation vector is built fresh and discarded after inference.
pub fn run_prediction(
    session: &SessionContext,
    classifier: &dyn Classifier,
    fields: &HashMap<String, String>,
    options: PredictOptions,
) -> Result<Prediction, PredictError> {
    let report = validate_fields(fields);
    if !report.is_valid() {
        debug!("Rejecting submission: {} field issue(s)", report.issues.len());
        return Err(PredictError::Validation(report));
    }

    let observation = assemble_observation(&session.feature_order, fields)?;
    debug!("Observation assembled: {} features", observation.len());

    let probabilities = classifier.predict(&observation)?;
    let probability = probabilities.positive;

    let diagnosis = decide(probability, session.cutoff);
    info!("Prediction complete: score={probability:.3}, diagnosis={diagnosis}");

    Ok(Prediction {
        probability,
        diagnosis,
        diagnosis_text: diagnosis.to_string(),
        cutoff: session.cutoff,
        findings: options.include_findings.then(|| report.abnormal),
        plot: options
            .include_plot
            .then(|| prepare_plot(&session.population, probability)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use leukodx_common::PopulationRecord;
    use leukodx_model::MockClassifier;

    fn session(features: &[&str], cutoff: f64, population: Vec<PopulationRecord>) -> SessionContext {
        SessionContext::new(
            features.iter().map(|s| s.to_string()).collect(),
            cutoff,
            population,
        )
    }

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn background() -> Vec<PopulationRecord> {
        vec![
            PopulationRecord { probability: 0.1, label: DiagnosisLabel::LeukemoidReaction },
            PopulationRecord { probability: 0.9, label: DiagnosisLabel::MyeloidMalignancy },
        ]
    }

    #[test]
    fn test_positive_scenario() {
        let session = session(&["age", "ldh"], 0.5, background());
        let mock = MockClassifier::new(2).with_probabilities(0.3, 0.7);

        let prediction = run_prediction(
            &session,
            &mock,
            &fields(&[("age", "55"), ("ldh", "300")]),
            PredictOptions::default(),
        )
        .unwrap();

        assert_eq!(prediction.probability, 0.7);
        assert_eq!(prediction.diagnosis, DiagnosisLabel::MyeloidMalignancy);
        assert_eq!(prediction.diagnosis_text, "Myeloid Malignancy");
        // ldh 300 is above the normal band
        assert_eq!(prediction.findings.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_subject_is_ranked_into_population() {
        let session = session(&["age", "ldh"], 0.5, background());
        let mock = MockClassifier::new(2).with_probabilities(0.5, 0.5);

        let prediction = run_prediction(
            &session,
            &mock,
            &fields(&[("age", "55"), ("ldh", "100")]),
            PredictOptions::default(),
        )
        .unwrap();

        let plot = prediction.plot.unwrap();
        assert_eq!(plot.len(), 3);
        assert_eq!(plot.leukemoid[0].rank, 1);
        assert_eq!(plot.subject[0].rank, 2);
        assert_eq!(plot.myeloid[0].rank, 3);
    }

    #[test]
    fn test_wbc_floor_blocks_before_inference() {
        let session = session(&["initial_wbc_50"], 0.5, vec![]);
        let mock = MockClassifier::new(1).with_probabilities(0.2, 0.8);

        let err = run_prediction(
            &session,
            &mock,
            &fields(&[("initial_wbc_50", "40")]),
            PredictOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, PredictError::Validation(_)));
        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn test_missing_feature_blocks_before_inference() {
        let session = session(&["age", "ldh"], 0.5, vec![]);
        let mock = MockClassifier::new(2);

        let err = run_prediction(
            &session,
            &mock,
            &fields(&[("age", "55")]),
            PredictOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, PredictError::Assemble(AssembleError::MissingField(_))));
        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn test_idempotent() {
        let session = session(&["age", "ldh"], 0.5, background());
        let mock = MockClassifier::new(2).with_probabilities(0.3, 0.7);
        let input = fields(&[("age", "55"), ("ldh", "300")]);

        let first = run_prediction(&session, &mock, &input, PredictOptions::default()).unwrap();
        let second = run_prediction(&session, &mock, &input, PredictOptions::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_boundary_probability_classifies_positive() {
        let session = session(&["age"], 0.42, vec![]);
        let mock = MockClassifier::new(1).with_probabilities(0.58, 0.42);

        let prediction = run_prediction(
            &session,
            &mock,
            &fields(&[("age", "55")]),
            PredictOptions::default(),
        )
        .unwrap();

        assert_eq!(prediction.diagnosis, DiagnosisLabel::MyeloidMalignancy);
    }

    #[test]
    fn test_options_trim_response() {
        let session = session(&["age", "ldh"], 0.5, background());
        let mock = MockClassifier::new(2).with_probabilities(0.3, 0.7);

        let prediction = run_prediction(
            &session,
            &mock,
            &fields(&[("age", "55"), ("ldh", "300")]),
            PredictOptions { include_plot: false, include_findings: false },
        )
        .unwrap();

        assert!(prediction.plot.is_none());
        assert!(prediction.findings.is_none());
        // The computational contract is unchanged
        assert_eq!(prediction.probability, 0.7);
        assert_eq!(prediction.diagnosis, DiagnosisLabel::MyeloidMalignancy);
    }
}
