//! Write a deterministic demo weights artifact so the server can be
//! smoke-tested without the real trained export.
//!
//! Run with: cargo run -p leukodx-model --bin demo_model [-- <output-path>]

use std::collections::HashMap;

use candle_core::{Device, Tensor};
use leukodx_model::{BIAS_TENSOR, WEIGHT_TENSOR};

const NUM_FEATURES: usize = 13;

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "models/classifier.safetensors".to_string());

    if let Some(parent) = std::path::Path::new(&path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let device = Device::Cpu;

    // Small fixed weights: class 0 flat, class 1 lightly loaded on the
    // later (differential) features. Demo quality only.
    let mut weight = vec![0.0f32; 2 * NUM_FEATURES];
    for (i, w) in weight[NUM_FEATURES..].iter_mut().enumerate() {
        *w = 0.01 * (i as f32 + 1.0);
    }

    let tensors: HashMap<String, Tensor> = HashMap::from([
        (
            WEIGHT_TENSOR.to_string(),
            Tensor::from_vec(weight, (2, NUM_FEATURES), &device)?,
        ),
        (
            BIAS_TENSOR.to_string(),
            Tensor::from_vec(vec![0.0f32, -0.5], (2,), &device)?,
        ),
    ]);

    candle_core::safetensors::save(&tensors, &path)?;
    println!("Wrote demo classifier ({NUM_FEATURES} features) to {path}");

    Ok(())
}
