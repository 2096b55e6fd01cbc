//! Assessment service: metrics in, model text out.
//!
//! This service coordinates:
//! - BMI derivation
//! - Prompt construction
//! - The single text-generation call
//! - Folding any failure into a displayable outcome

use std::sync::Arc;
use std::time::Instant;

use crate::domain::{build_prompt, Assessment, AssessmentOutcome, HealthMetrics};
use crate::ports::TextGenerator;

/// Service for running one health assessment.
///
/// Stateless apart from the shared generator, so it can be handed to a
/// worker thread behind an `Arc` without locking.
pub struct AssessmentService<G>
where
    G: TextGenerator + ?Sized,
{
    generator: Arc<G>,
}

impl<G> AssessmentService<G>
where
    G: TextGenerator + ?Sized,
{
    /// Create a new assessment service.
    pub fn new(generator: Arc<G>) -> Self {
        Self { generator }
    }

    /// Identifier of the backing model.
    #[must_use]
    pub fn model_name(&self) -> &str {
        self.generator.model_name()
    }

    /// Run the full pipeline for one submission.
    ///
    /// Never fails: a generator error becomes `AssessmentOutcome::Failed`,
    /// whose display text carries the "Error in generating response:" prefix.
    #[must_use]
    pub fn assess(&self, metrics: HealthMetrics) -> Assessment {
        let prompt = build_prompt(&metrics);
        let model = self.generator.model_name().to_string();

        tracing::info!(model = %model, prompt_chars = prompt.len(), "Requesting health assessment");
        let started = Instant::now();

        let outcome = match self.generator.generate(&prompt) {
            Ok(text) => {
                tracing::info!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    response_chars = text.len(),
                    "Assessment received"
                );
                AssessmentOutcome::Response(text)
            }
            Err(e) => {
                tracing::warn!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Assessment failed: {}",
                    e
                );
                AssessmentOutcome::Failed(e.to_string())
            }
        };

        Assessment::new(metrics, prompt, model, outcome)
    }
}

impl<G> Clone for AssessmentService<G>
where
    G: TextGenerator + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            generator: Arc::clone(&self.generator),
        }
    }
}
