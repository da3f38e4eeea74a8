//! Configuration for the classifier runtime.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the Candle classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Path to the safetensors weights artifact
    pub weights_path: PathBuf,

    /// Use GPU if available (default: false — the panel is 13 floats)
    #[serde(default)]
    pub use_gpu: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            weights_path: PathBuf::from("models/classifier.safetensors"),
            use_gpu: false,
        }
    }
}

impl ClassifierConfig {
    pub fn new(weights_path: impl Into<PathBuf>) -> Self {
        Self {
            weights_path: weights_path.into(),
            use_gpu: false,
        }
    }

    pub fn with_gpu(mut self) -> Self {
        self.use_gpu = true;
        self
    }
}
