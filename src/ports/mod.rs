//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the application and the external model API.

mod text_generator;

pub use text_generator::{GenerationError, TextGenerator};
