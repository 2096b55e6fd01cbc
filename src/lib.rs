//! # Health Assessment
//!
//! Terminal tool that collects a handful of vital signs, computes BMI and
//! asks a text-generation model to place the user into a risk band.
//!
//! The risk band itself is never computed here: the crate only formats the
//! inputs and a fixed rubric into a prompt and displays whatever comes back.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Input record, BMI, rubric/prompt template, reference table
//! - `ports`: Trait definitions for external operations (text generation)
//! - `adapters`: Concrete implementations (Gemini HTTP, canned responses, log sanitising)
//! - `application`: Use cases orchestrating domain and ports
//! - `config`: Environment-sourced settings
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Assessment, AssessmentOutcome, HealthMetrics, Sex};

/// Result type for health assessment operations
pub type Result<T> = std::result::Result<T, HealthError>;

/// Main error type for the crate
#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    #[error("Invalid health data: {0}")]
    Validation(String),

    #[error("Text generation failed: {0}")]
    Generation(#[from] ports::GenerationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::GenerationError;

    #[test]
    fn test_error_conversions() {
        let err: HealthError = GenerationError::Timeout(5).into();
        assert!(matches!(err, HealthError::Generation(GenerationError::Timeout(5))));
        assert_eq!(err.to_string(), "Text generation failed: Request timed out after 5s");

        let err: HealthError = std::io::Error::new(std::io::ErrorKind::Other, "tty gone").into();
        assert!(matches!(err, HealthError::Io(_)));

        let err = HealthError::Validation("Age: Value must be between 0 and 120".into());
        assert_eq!(err.to_string(), "Invalid health data: Age: Value must be between 0 and 120");
    }
}
