//! Application layer: Use cases and services.
//!
//! Orchestrates domain logic with ports to implement the one use case of
//! the tool: turning a set of metrics into a model-written assessment.

mod assessment;

pub use assessment::AssessmentService;
