//! Gemini adapter: Implementation of TextGenerator over the
//! Generative Language REST API.
//!
//! One blocking `generateContent` call per prompt. No streaming, no retries.

mod models;

use std::time::Duration;

use zeroize::Zeroizing;

use crate::adapters::sanitize::sanitize;
use crate::config::GeminiConfig;
use crate::ports::{GenerationError, TextGenerator};

pub use models::{extract_text, GenerateContentRequest, GenerateContentResponse};

/// Blocking HTTP client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    api_key: Zeroizing<String>,
    model: String,
    base_url: String,
    timeout: Option<Duration>,
    http: reqwest::blocking::Client,
}

impl GeminiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    /// Returns `GenerationError::Http` if the HTTP client cannot be built
    /// (e.g. TLS backend initialisation failure).
    pub fn new(config: &GeminiConfig) -> Result<Self, GenerationError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("health-assessment/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GenerationError::Http(sanitize(&e.to_string())))?;

        Ok(Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
            http,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn map_send_error(&self, e: &reqwest::Error) -> GenerationError {
        if e.is_connect() {
            GenerationError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            GenerationError::Timeout(self.timeout.map_or(0, |t| t.as_secs()))
        } else {
            GenerationError::Http(sanitize(&e.to_string()))
        }
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = GenerateContentRequest::user_prompt(prompt);

        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "Sending generateContent request");

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&body)
            .send()
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body: sanitize(body.trim()),
            });
        }

        let raw = response.text().map_err(|e| self.map_send_error(&e))?;
        let parsed: GenerateContentResponse = serde_json::from_str(&raw)
            .map_err(|e| GenerationError::ResponseParsing(sanitize(&e.to_string())))?;

        extract_text(&parsed)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
