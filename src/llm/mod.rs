//! Text-generation endpoint client
//!
//! One bounded, synchronous request per prediction. The `TextGenerator`
//! trait is the seam between the orchestration layer and the concrete
//! Ollama client.

mod client;

pub use client::OllamaClient;

use std::time::Duration;
use thiserror::Error;

/// Default Ollama endpoint
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Configuration for the generation client
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Base URL of the Ollama server
    pub base_url: String,
    /// Model name to generate with
    pub model: String,
    /// Request timeout; the call is abandoned after this
    pub timeout: Duration,
    /// Sampling temperature (low, deterministic-leaning)
    pub temperature: f32,
    /// Maximum tokens to generate
    pub num_predict: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: "llama2".to_string(),
            timeout: Duration::from_secs(45),
            temperature: 0.1,
            num_predict: 1000,
        }
    }
}

/// Request outcome classification
///
/// The `Display` form is the human-readable reason surfaced to callers.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Service unreachable
    #[error("Connection refused. Is Ollama running?")]
    Unreachable,
    /// Endpoint answered with a non-2xx status
    #[error("HTTP {0}")]
    Status(u16),
    /// Any other transport-level fault
    #[error("Request error: {0}")]
    Transport(String),
}

/// A text-generation backend
pub trait TextGenerator {
    /// Send one prompt and return the raw response text
    ///
    /// A single failed attempt is terminal; implementations must not retry.
    fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_config_default() {
        let config = GeneratorConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, "llama2");
        assert_eq!(config.timeout, Duration::from_secs(45));
        assert_eq!(config.num_predict, 1000);
    }

    #[test]
    fn test_error_reasons() {
        assert_eq!(
            GenerateError::Unreachable.to_string(),
            "Connection refused. Is Ollama running?"
        );
        assert_eq!(GenerateError::Status(503).to_string(), "HTTP 503");
        assert_eq!(
            GenerateError::Transport("timed out".to_string()).to_string(),
            "Request error: timed out"
        );
    }
}
