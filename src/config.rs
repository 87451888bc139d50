//! Configuration types for crypto-seer

use crate::llm::{GeneratorConfig, DEFAULT_BASE_URL};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub history: HistoryConfig,
    #[serde(default)]
    pub generator: GeneratorSettings,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Input data file locations
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// Price history JSON written by the acquisition script
    pub prices_path: PathBuf,
    /// Optional news JSON; omitted means no news context
    #[serde(default)]
    pub news_path: Option<PathBuf>,
}

/// Text-generation endpoint settings
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Token budget for the generation
    #[serde(default = "default_num_predict")]
    pub num_predict: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_model() -> String {
    "llama2".to_string()
}
fn default_timeout_secs() -> u64 {
    45
}
fn default_temperature() -> f32 {
    0.1
}
fn default_num_predict() -> u32 {
    1000
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
            num_predict: default_num_predict(),
        }
    }
}

impl GeneratorSettings {
    /// Resolve into the client configuration
    pub fn client_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            temperature: self.temperature,
            num_predict: self.num_predict,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
