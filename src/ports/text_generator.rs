//! Text generation port: Trait for the external language model.
//!
//! The model is an opaque collaborator: a prompt goes in, text or an error
//! comes out.

/// Errors a text generator can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("Cannot connect to model API at {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Model API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse model response: {0}")]
    ResponseParsing(String),

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("Prompt blocked by model: {0}")]
    Blocked(String),

    #[error("HTTP client error: {0}")]
    Http(String),
}

/// Trait for text-generation backends.
///
/// Implementations are called from a worker thread, hence `Send + Sync`.
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` verbatim and return the model's text.
    ///
    /// # Errors
    /// Returns a `GenerationError` describing why no text was produced.
    fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Identifier of the model answering, for display and logs.
    fn model_name(&self) -> &str;
}
