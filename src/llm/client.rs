//! Blocking client for Ollama's `/api/generate` endpoint

use super::{GenerateError, GeneratorConfig, TextGenerator};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

/// Request body for `/api/generate`
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}

/// Response body for `/api/generate`
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    /// Generated text; absent field decodes as empty rather than failing
    #[serde(default)]
    response: String,
}

/// Client for a locally hosted Ollama server
pub struct OllamaClient {
    config: GeneratorConfig,
    client: Client,
}

impl OllamaClient {
    /// Create a new client with the given configuration
    pub fn new(config: GeneratorConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl TextGenerator for OllamaClient {
    fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let url = format!("{}/api/generate", self.config.base_url);
        let body = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.config.temperature,
                num_predict: self.config.num_predict,
            },
        };

        tracing::debug!(url = %url, model = %self.config.model, "Sending generation request");

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                GenerateError::Unreachable
            } else {
                GenerateError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Generation endpoint returned error status");
            return Err(GenerateError::Status(status.as_u16()));
        }

        let decoded: GenerateResponse = response
            .json()
            .map_err(|e| GenerateError::Transport(e.to_string()))?;

        tracing::debug!(response_len = decoded.response.len(), "Received generation response");
        Ok(decoded.response)
    }
}
