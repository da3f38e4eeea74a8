//! Error types for classifier loading and inference.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model loading failed: {0}")]
    ModelLoad(String),

    #[error("Tensor '{name}' not found in weights file. Available: {available:?}")]
    MissingTensor { name: String, available: Vec<String> },

    #[error("Output does not have the expected structure (tensor<f32>[1, 2]); found shape {found}")]
    OutputShape { found: String },

    #[error("Observation has {got} values but the classifier expects {expected}")]
    FeatureCount { expected: usize, got: usize },

    #[error("Prediction score extraction resulted in a non-finite value")]
    NonFinite,

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<candle_core::Error> for ModelError {
    fn from(e: candle_core::Error) -> Self {
        ModelError::Inference(e.to_string())
    }
}
