//! TUI module: Terminal User Interface using Ratatui.
//!
//! Two screens:
//! - Health data entry form with a live BMI preview
//! - Assessment result with the reference ranges

mod app;
mod styles;
mod ui;
mod worker;

pub use app::{App, Screen};
pub use styles::MedicalTheme;
pub use worker::{AssessmentProgress, AssessmentWorker, AssessmentWorkerHandle, WorkerPoll};
