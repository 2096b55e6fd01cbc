//! Background worker for the model call.
//!
//! The request can take many seconds; running it off the UI thread keeps the
//! terminal redrawing and the progress gauge moving.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use crate::application::AssessmentService;
use crate::domain::{Assessment, HealthMetrics};
use crate::ports::TextGenerator;

/// Progress updates from the assessment worker.
#[derive(Debug, Clone)]
pub enum AssessmentProgress {
    /// Building the prompt
    Preparing,
    /// Prompt sent, waiting for the model
    Awaiting,
    /// Finished (successfully or with a displayable failure)
    Complete(Box<Assessment>),
}

/// Result of polling the worker once.
#[derive(Debug)]
pub enum WorkerPoll {
    Progress(AssessmentProgress),
    Idle,
    /// The worker exited without reporting completion
    Disconnected,
}

/// Handle to a running assessment worker.
pub struct AssessmentWorkerHandle {
    progress_rx: Receiver<AssessmentProgress>,
    _handle: JoinHandle<()>,
}

impl AssessmentWorkerHandle {
    /// Try to receive the next progress update (non-blocking).
    #[must_use]
    pub fn poll(&self) -> WorkerPoll {
        match self.progress_rx.try_recv() {
            Ok(progress) => WorkerPoll::Progress(progress),
            Err(TryRecvError::Empty) => WorkerPoll::Idle,
            Err(TryRecvError::Disconnected) => WorkerPoll::Disconnected,
        }
    }

    /// Block until the worker completes. Used by tests and non-interactive callers.
    #[must_use]
    pub fn wait(self) -> Option<Assessment> {
        self.progress_rx.iter().find_map(|p| match p {
            AssessmentProgress::Complete(assessment) => Some(*assessment),
            _ => None,
        })
    }
}

/// Spawns assessment runs on a background thread.
pub struct AssessmentWorker;

impl AssessmentWorker {
    /// Spawn a background assessment.
    ///
    /// Returns a handle to receive progress updates.
    pub fn spawn<G>(service: AssessmentService<G>, metrics: HealthMetrics) -> AssessmentWorkerHandle
    where
        G: TextGenerator + ?Sized + 'static,
    {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            Self::run_with_progress(&service, metrics, &tx);
        });

        AssessmentWorkerHandle {
            progress_rx: rx,
            _handle: handle,
        }
    }

    fn run_with_progress<G>(
        service: &AssessmentService<G>,
        metrics: HealthMetrics,
        tx: &Sender<AssessmentProgress>,
    ) where
        G: TextGenerator + ?Sized,
    {
        // Send failures only mean the UI has gone away.
        let _ = tx.send(AssessmentProgress::Preparing);
        let _ = tx.send(AssessmentProgress::Awaiting);

        let assessment = service.assess(metrics);
        let _ = tx.send(AssessmentProgress::Complete(Box::new(assessment)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::CannedGenerator;
    use crate::ports::GenerationError;
    use std::sync::Arc;

    #[test]
    fn test_worker_completes() {
        let service = AssessmentService::new(Arc::new(CannedGenerator::new("done")));
        let handle = AssessmentWorker::spawn(service, HealthMetrics::sample());

        let assessment = handle.wait().expect("Worker reports completion");
        assert_eq!(assessment.display_text(), "done");
    }

    #[test]
    fn test_worker_reports_failure_as_completion() {
        let service = AssessmentService::new(Arc::new(CannedGenerator::failing(
            GenerationError::Timeout(10),
        )));
        let handle = AssessmentWorker::spawn(service, HealthMetrics::sample());

        let assessment = handle.wait().expect("Worker reports completion");
        assert!(assessment
            .display_text()
            .starts_with("Error in generating response:"));
    }
}
