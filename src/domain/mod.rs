//! Domain layer: Core types and the little arithmetic this tool does.
//!
//! Pure Rust types with no I/O. Everything here lives for a single
//! submission and is never persisted.

mod assessment;
mod metrics;
pub mod prompt;
mod reference;

pub use assessment::{Assessment, AssessmentOutcome, RiskLevel, ERROR_PREFIX};
pub use metrics::{HealthMetrics, Sex, MAX_AGE};
pub use prompt::{build_prompt, Rubric};
pub use reference::{reference_table, ReferenceRange};
