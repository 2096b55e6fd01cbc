//! Adapters layer: Concrete implementations of ports.
//!
//! - `gemini`: Gemini REST API over blocking reqwest
//! - `mock`: canned responses for offline mode and tests
//! - `sanitize`: secret filtering for logs and error strings

pub mod gemini;
pub mod mock;
pub mod sanitize;

use std::sync::Arc;

use crate::config::{AppConfig, Backend};
use crate::ports::{GenerationError, TextGenerator};

/// Build the text generator selected by configuration.
///
/// # Errors
/// Returns an error if the HTTP client cannot be constructed.
pub fn generator_from_config(config: &AppConfig) -> Result<Arc<dyn TextGenerator>, GenerationError> {
    match &config.backend {
        Backend::Gemini(gemini) => Ok(Arc::new(gemini::GeminiClient::new(gemini)?)),
        Backend::Offline => Ok(Arc::new(mock::CannedGenerator::offline())),
    }
}
