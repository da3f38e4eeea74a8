//! Configuration loading for the Leukodx server.
//! Reads leukodx.toml from the current directory or the path in LEUKODX_CONFIG.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub resources: ResourceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 3001 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Newline-delimited feature names, classifier input order.
    #[serde(default = "default_feature_order_path")]
    pub feature_order_path: PathBuf,
    /// Cutoff plus background population document.
    #[serde(default = "default_population_path")]
    pub population_path: PathBuf,
    /// Classifier weights artifact.
    #[serde(default = "default_weights_path")]
    pub weights_path: PathBuf,
    #[serde(default)]
    pub use_gpu: bool,
}

fn default_feature_order_path() -> PathBuf { PathBuf::from("data/feature_order.txt") }
fn default_population_path() -> PathBuf { PathBuf::from("data/population.json") }
fn default_weights_path() -> PathBuf { PathBuf::from("models/classifier.safetensors") }

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            feature_order_path: default_feature_order_path(),
            population_path: default_population_path(),
            weights_path: default_weights_path(),
            use_gpu: false,
        }
    }
}

impl AppConfig {
    /// Load the config file named by LEUKODX_CONFIG, falling back to
    /// ./leukodx.toml, falling back to defaults when no file exists.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("LEUKODX_CONFIG").unwrap_or_else(|_| "leukodx.toml".to_string());
        Self::from_path(path)
    }

    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}
