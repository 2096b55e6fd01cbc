//! Canned text generator for offline runs and tests.

use std::sync::Mutex;

use crate::config::OFFLINE_MODEL;
use crate::ports::{GenerationError, TextGenerator};

/// Response returned in offline mode.
pub const OFFLINE_RESPONSE: &str = "Risk Level: 2 (Moderate)\n\
Recommendation: Offline mode is active, so no model was consulted. \
Compare your values with the reference table and discuss any reading \
outside the normal range with a healthcare provider.";

/// Returns a fixed response (or error) and remembers the last prompt.
pub struct CannedGenerator {
    reply: Result<String, GenerationError>,
    model: String,
    last_prompt: Mutex<Option<String>>,
}

impl CannedGenerator {
    /// Always answer with `response`.
    pub fn new(response: &str) -> Self {
        Self {
            reply: Ok(response.to_string()),
            model: OFFLINE_MODEL.to_string(),
            last_prompt: Mutex::new(None),
        }
    }

    /// Always fail with `error`.
    pub fn failing(error: GenerationError) -> Self {
        Self {
            reply: Err(error),
            model: OFFLINE_MODEL.to_string(),
            last_prompt: Mutex::new(None),
        }
    }

    /// The generator used when `HEALTH_ASSESS_OFFLINE` is set.
    pub fn offline() -> Self {
        Self::new(OFFLINE_RESPONSE)
    }

    #[must_use]
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Prompt received by the most recent `generate` call.
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|p| p.clone())
    }
}

impl TextGenerator for CannedGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }
        self.reply.clone()
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_response() {
        let generator = CannedGenerator::new("fine").with_model("stub");
        assert_eq!(generator.generate("p1"), Ok("fine".to_string()));
        assert_eq!(generator.last_prompt().as_deref(), Some("p1"));
        assert_eq!(generator.model_name(), "stub");
    }

    #[test]
    fn test_failing_generator() {
        let generator = CannedGenerator::failing(GenerationError::EmptyResponse);
        assert_eq!(generator.generate("p"), Err(GenerationError::EmptyResponse));
        assert_eq!(generator.last_prompt().as_deref(), Some("p"));
    }
}
