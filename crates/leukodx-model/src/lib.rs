//! Leukodx classifier runtime
//!
//! Pure Rust inference over Candle: the trained leukocytosis classifier
//! ships as a local safetensors artifact and runs on CPU (optionally GPU).
//! No Python dependency.
//!
//! The artifact holds a linear decision head under fixed tensor names; the
//! forward pass and softmax execute in the Candle runtime. Anything the
//! artifact does that deviates from the [1, 2]-probability contract is
//! surfaced as a structural error with enough detail to diagnose the export.

pub mod classifier;
pub mod config;
pub mod error;

pub use classifier::{CandleClassifier, Classifier, MockClassifier, BIAS_TENSOR, WEIGHT_TENSOR};
pub use config::ClassifierConfig;
pub use error::{ModelError, Result};
