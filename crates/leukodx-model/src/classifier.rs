//! Binary classifier invocation over Candle.
//!
//! The trained model ships as a safetensors artifact holding a linear
//! decision head under fixed tensor names. The invoker builds a [1, n]
//! input tensor from the observation, runs the forward pass, applies
//! softmax, and extracts the two-class probability pair.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use candle_core::{DType, Device, Tensor};
use tracing::{debug, info};

use leukodx_common::{ClassProbabilities, ObservationVector};

use crate::config::ClassifierConfig;
use crate::error::{ModelError, Result};

/// Tensor names the weights artifact must provide.
pub const WEIGHT_TENSOR: &str = "classifier.weight";
pub const BIAS_TENSOR: &str = "classifier.bias";

/// Seam between the prediction pipeline and the external classifier runtime.
pub trait Classifier: Send + Sync {
    /// Number of input features the loaded model expects.
    fn num_features(&self) -> usize;

    /// Run one forward pass and return the two-class probability pair
    /// (class 0 = leukemoid reaction, class 1 = myeloid malignancy).
    fn predict(&self, observation: &ObservationVector) -> Result<ClassProbabilities>;
}

/// Candle-backed classifier loaded from a local safetensors artifact.
#[derive(Debug)]
pub struct CandleClassifier {
    /// [num_classes, num_features]
    weight: Tensor,
    /// [num_classes]
    bias: Tensor,
    num_features: usize,
    device: Device,
}

impl CandleClassifier {
    /// Load the classifier weights. Failure here is fatal for the session:
    /// the caller keeps serving but leaves prediction disabled.
    pub fn load(config: &ClassifierConfig) -> Result<Self> {
        let start = Instant::now();
        info!("Loading classifier weights: {}", config.weights_path.display());

        let device = if config.use_gpu {
            Device::cuda_if_available(0).unwrap_or(Device::Cpu)
        } else {
            Device::Cpu
        };
        debug!("Using device: {:?}", device);

        let tensors = candle_core::safetensors::load(&config.weights_path, &device)
            .map_err(|e| ModelError::ModelLoad(format!("{}: {}", config.weights_path.display(), e)))?;

        let weight = lookup(&tensors, WEIGHT_TENSOR)?.to_dtype(DType::F32)?;
        let bias = lookup(&tensors, BIAS_TENSOR)?.to_dtype(DType::F32)?;

        let (num_classes, num_features) = weight
            .dims2()
            .map_err(|e| ModelError::ModelLoad(format!("{WEIGHT_TENSOR}: {e}")))?;
        let bias_len = bias
            .dims1()
            .map_err(|e| ModelError::ModelLoad(format!("{BIAS_TENSOR}: {e}")))?;
        if bias_len != num_classes {
            return Err(ModelError::ModelLoad(format!(
                "{BIAS_TENSOR} has {bias_len} entries for {num_classes} classes"
            )));
        }

        info!(
            "Classifier loaded in {:.2?}: {} features, {} classes",
            start.elapsed(),
            num_features,
            num_classes
        );

        Ok(Self { weight, bias, num_features, device })
    }
}

fn lookup(tensors: &HashMap<String, Tensor>, name: &str) -> Result<Tensor> {
    tensors.get(name).cloned().ok_or_else(|| {
        let mut available: Vec<String> = tensors.keys().cloned().collect();
        available.sort();
        ModelError::MissingTensor { name: name.to_string(), available }
    })
}

impl Classifier for CandleClassifier {
    fn num_features(&self) -> usize {
        self.num_features
    }

    fn predict(&self, observation: &ObservationVector) -> Result<ClassProbabilities> {
        if observation.len() != self.num_features {
            return Err(ModelError::FeatureCount {
                expected: self.num_features,
                got: observation.len(),
            });
        }

        let input = Tensor::from_vec(observation.as_f32(), (1, observation.len()), &self.device)?;
        let logits = input.matmul(&self.weight.t()?)?.broadcast_add(&self.bias)?;
        let probs = candle_nn::ops::softmax(&logits, 1)?;

        // The contract with the artifact is a [1, 2] probability pair;
        // anything else is a structural error, surfaced with the shape
        // actually received.
        let dims = probs.dims();
        if dims.len() != 2 || dims[0] != 1 || dims[1] != 2 {
            return Err(ModelError::OutputShape { found: format!("{dims:?}") });
        }

        let row = probs.to_vec2::<f32>()?;
        let negative = f64::from(row[0][0]);
        let positive = f64::from(row[0][1]);
        if !negative.is_finite() || !positive.is_finite() {
            return Err(ModelError::NonFinite);
        }

        debug!("Class probabilities: [{negative:.4}, {positive:.4}]");
        Ok(ClassProbabilities { negative, positive })
    }
}

/// Fixed-output classifier for tests and offline development.
pub struct MockClassifier {
    num_features: usize,
    probabilities: ClassProbabilities,
    calls: AtomicUsize,
}

impl MockClassifier {
    pub fn new(num_features: usize) -> Self {
        Self {
            num_features,
            probabilities: ClassProbabilities { negative: 0.5, positive: 0.5 },
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_probabilities(mut self, negative: f64, positive: f64) -> Self {
        self.probabilities = ClassProbabilities { negative, positive };
        self
    }

    /// Number of forward passes requested so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Classifier for MockClassifier {
    fn num_features(&self) -> usize {
        self.num_features
    }

    fn predict(&self, observation: &ObservationVector) -> Result<ClassProbabilities> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if observation.len() != self.num_features {
            return Err(ModelError::FeatureCount {
                expected: self.num_features,
                got: observation.len(),
            });
        }
        Ok(self.probabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn save_artifact(path: &Path, tensors: &[(&str, Tensor)]) {
        let map: HashMap<String, Tensor> = tensors
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        candle_core::safetensors::save(&map, path).unwrap();
    }

    fn linear_artifact(path: &Path, weight: Vec<f32>, classes: usize, features: usize, bias: Vec<f32>) {
        let device = Device::Cpu;
        let w = Tensor::from_vec(weight, (classes, features), &device).unwrap();
        let b = Tensor::from_vec(bias, (classes,), &device).unwrap();
        save_artifact(path, &[(WEIGHT_TENSOR, w), (BIAS_TENSOR, b)]);
    }

    #[test]
    fn test_zero_weights_give_even_split() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.safetensors");
        linear_artifact(&path, vec![0.0; 4], 2, 2, vec![0.0, 0.0]);

        let clf = CandleClassifier::load(&ClassifierConfig::new(&path)).unwrap();
        assert_eq!(clf.num_features(), 2);

        let probs = clf.predict(&ObservationVector::new(vec![55.0, 300.0])).unwrap();
        assert!((probs.negative - 0.5).abs() < 1e-6);
        assert!((probs.positive - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_bias_shifts_positive_probability() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.safetensors");
        // With zero weights, softmax over [0, b1] gives p1 = e^b1 / (1 + e^b1).
        // b1 = ln(7/3) makes p1 = 0.7.
        let b1 = (7.0f32 / 3.0).ln();
        linear_artifact(&path, vec![0.0; 4], 2, 2, vec![0.0, b1]);

        let clf = CandleClassifier::load(&ClassifierConfig::new(&path)).unwrap();
        let probs = clf.predict(&ObservationVector::new(vec![1.0, 1.0])).unwrap();
        assert!((probs.positive - 0.7).abs() < 1e-5);
        assert!((probs.negative + probs.positive - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.safetensors");
        linear_artifact(&path, vec![0.3, -0.2, 0.1, 0.4], 2, 2, vec![0.05, -0.1]);

        let clf = CandleClassifier::load(&ClassifierConfig::new(&path)).unwrap();
        let probs = clf.predict(&ObservationVector::new(vec![2.0, -1.5])).unwrap();
        assert!((probs.negative + probs.positive - 1.0).abs() < 1e-6);
        assert!(probs.positive >= 0.0 && probs.positive <= 1.0);
    }

    #[test]
    fn test_missing_tensor_lists_available_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.safetensors");
        let w = Tensor::from_vec(vec![0.0f32; 4], (2, 2), &Device::Cpu).unwrap();
        save_artifact(&path, &[(WEIGHT_TENSOR, w)]);

        let err = CandleClassifier::load(&ClassifierConfig::new(&path)).unwrap_err();
        match err {
            ModelError::MissingTensor { name, available } => {
                assert_eq!(name, BIAS_TENSOR);
                assert_eq!(available, vec![WEIGHT_TENSOR.to_string()]);
            }
            other => panic!("expected MissingTensor, got {other:?}"),
        }
    }

    #[test]
    fn test_three_class_artifact_fails_with_received_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.safetensors");
        linear_artifact(&path, vec![0.0; 6], 3, 2, vec![0.0, 0.0, 0.0]);

        let clf = CandleClassifier::load(&ClassifierConfig::new(&path)).unwrap();
        let err = clf.predict(&ObservationVector::new(vec![1.0, 2.0])).unwrap_err();
        match err {
            ModelError::OutputShape { found } => assert_eq!(found, "[1, 3]"),
            other => panic!("expected OutputShape, got {other:?}"),
        }
    }

    #[test]
    fn test_feature_count_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.safetensors");
        linear_artifact(&path, vec![0.0; 4], 2, 2, vec![0.0, 0.0]);

        let clf = CandleClassifier::load(&ClassifierConfig::new(&path)).unwrap();
        let err = clf.predict(&ObservationVector::new(vec![1.0, 2.0, 3.0])).unwrap_err();
        assert!(matches!(err, ModelError::FeatureCount { expected: 2, got: 3 }));
    }

    #[test]
    fn test_unreadable_artifact_is_load_error() {
        let err = CandleClassifier::load(&ClassifierConfig::new("does/not/exist.safetensors"))
            .unwrap_err();
        assert!(matches!(err, ModelError::ModelLoad(_)));
    }

    #[test]
    fn test_mock_counts_calls() {
        let mock = MockClassifier::new(2).with_probabilities(0.3, 0.7);
        assert_eq!(mock.call_count(), 0);
        let probs = mock.predict(&ObservationVector::new(vec![1.0, 2.0])).unwrap();
        assert_eq!(probs.positive, 0.7);
        assert_eq!(mock.call_count(), 1);
    }
}
