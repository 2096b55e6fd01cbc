//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Running the assessment on a background worker

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::generator_from_config;
use crate::application::AssessmentService;
use crate::config::AppConfig;
use crate::domain::{build_prompt, Assessment, AssessmentOutcome, HealthMetrics};
use crate::ports::TextGenerator;
use crate::{HealthError, Result};

use super::ui::{
    form::{render_assessment_form, AssessmentFormState},
    render_disclaimer,
    result::{render_result, ResultState},
};
use super::worker::{AssessmentProgress, AssessmentWorker, AssessmentWorkerHandle, WorkerPoll};

/// Lines moved by PageUp / PageDown on the result screen
const PAGE_LINES: u16 = 10;

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Form,
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssessmentPhase {
    Preparing,
    Awaiting,
}

/// Main application state
pub struct App {
    screen: Screen,
    should_quit: bool,
    service: AssessmentService<dyn TextGenerator>,
    form_state: AssessmentFormState,
    result_state: ResultState,

    /// Pending assessment worker (if running)
    pending_worker: Option<AssessmentWorkerHandle>,

    /// Metrics of the in-flight submission, for reporting a dead worker
    submitted: Option<HealthMetrics>,

    /// Current phase and when it started (for the progress animation)
    phase: Option<AssessmentPhase>,
    phase_started_at: Option<Instant>,
}

impl App {
    /// Create an application wired to the configured backend.
    ///
    /// # Errors
    /// Returns error if the text generator cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let generator = generator_from_config(config)?;
        Ok(Self::with_dependencies(AssessmentService::new(generator)))
    }

    /// Create application with an injected service (Composition Root pattern).
    #[must_use]
    pub fn with_dependencies(service: AssessmentService<dyn TextGenerator>) -> Self {
        Self {
            screen: Screen::Form,
            should_quit: false,
            service,
            form_state: AssessmentFormState::default(),
            result_state: ResultState::default(),
            pending_worker: None,
            submitted: None,
            phase: None,
            phase_started_at: None,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        tracing::info!(model = %self.service.model_name(), "Starting health assessment UI");

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        self.form_state.clear_sensitive();
        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_worker();
            self.tick_progress();

            terminal.draw(|f| self.draw(f))?;

            // Short poll to keep the gauge moving
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(f.area());

        match self.screen {
            Screen::Form => render_assessment_form(f, chunks[0], &self.form_state),
            Screen::Result => render_result(f, chunks[0], &self.result_state),
        }

        render_disclaimer(f, chunks[1]);
    }

    /// Drain progress messages from the background worker.
    fn poll_worker(&mut self) {
        loop {
            let Some(worker) = self.pending_worker.as_ref() else {
                return;
            };

            match worker.poll() {
                WorkerPoll::Idle => return,
                WorkerPoll::Progress(AssessmentProgress::Preparing) => {
                    self.set_phase(AssessmentPhase::Preparing);
                }
                WorkerPoll::Progress(AssessmentProgress::Awaiting) => {
                    self.set_phase(AssessmentPhase::Awaiting);
                }
                WorkerPoll::Progress(AssessmentProgress::Complete(assessment)) => {
                    self.finish(assessment);
                    return;
                }
                WorkerPoll::Disconnected => {
                    tracing::error!("Assessment worker exited without a result");
                    let metrics = self.submitted.unwrap_or_default();
                    let assessment = Assessment::new(
                        metrics,
                        build_prompt(&metrics),
                        self.service.model_name(),
                        AssessmentOutcome::Failed("assessment worker stopped unexpectedly".into()),
                    );
                    self.finish(Box::new(assessment));
                    return;
                }
            }
        }
    }

    fn finish(&mut self, assessment: Box<Assessment>) {
        tracing::info!(
            id = %assessment.id,
            failed = assessment.outcome.is_failure(),
            "Assessment ready"
        );
        self.result_state = ResultState::Complete {
            assessment,
            scroll: 0,
        };
        self.pending_worker = None;
        self.submitted = None;
        self.phase = None;
        self.phase_started_at = None;
    }

    fn set_phase(&mut self, phase: AssessmentPhase) {
        let current = self.result_state.progress().unwrap_or(0.0);
        let floor = match phase {
            AssessmentPhase::Preparing => 0.0,
            AssessmentPhase::Awaiting => 0.10,
        };
        let progress = current.max(floor);

        self.phase = Some(phase);
        self.phase_started_at = Some(Instant::now());
        self.result_state = match phase {
            AssessmentPhase::Preparing => ResultState::Preparing { progress },
            AssessmentPhase::Awaiting => ResultState::Awaiting { progress },
        };
    }

    fn tick_progress(&mut self) {
        if self.pending_worker.is_none() {
            return;
        }
        let (Some(phase), Some(started_at)) = (self.phase, self.phase_started_at) else {
            return;
        };
        let Some(current) = self.result_state.progress() else {
            return;
        };

        let elapsed = Instant::now()
            .saturating_duration_since(started_at)
            .as_secs_f64();

        let (start_floor, target, tau) = match phase {
            AssessmentPhase::Preparing => (0.02, 0.10, 0.3),
            AssessmentPhase::Awaiting => (0.10, 0.95, 8.0),
        };

        // Monotonic fake progress approaching the phase target
        let k = 1.0 - (-elapsed / tau).exp();
        let desired = start_floor + (target - start_floor) * k;
        let progress = desired.max(current).min(target);

        self.result_state = match phase {
            AssessmentPhase::Preparing => ResultState::Preparing { progress },
            AssessmentPhase::Awaiting => ResultState::Awaiting { progress },
        };
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Form => self.handle_form_key(key),
            Screen::Result => self.handle_result_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.form_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.form_state.next_field();
            }
            KeyCode::Left | KeyCode::Right => {
                self.form_state.toggle_sex();
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.form_state.load_sample_data();
            }
            KeyCode::Char(c) => {
                self.form_state.input_char(c);
            }
            KeyCode::Backspace => {
                self.form_state.delete_char();
            }
            KeyCode::Delete => {
                self.form_state.clear_field();
            }
            KeyCode::Enter => {
                self.submit_form();
            }
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        // Input is ignored while the request is in flight
        if !matches!(self.result_state, ResultState::Complete { .. }) {
            return;
        }

        match key {
            KeyCode::Down | KeyCode::Char('j') => self.result_state.scroll_down(),
            KeyCode::Up | KeyCode::Char('k') => self.result_state.scroll_up(),
            KeyCode::PageDown => {
                for _ in 0..PAGE_LINES {
                    self.result_state.scroll_down();
                }
            }
            KeyCode::PageUp => {
                for _ in 0..PAGE_LINES {
                    self.result_state.scroll_up();
                }
            }
            KeyCode::Enter => {
                self.screen = Screen::Form;
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.form_state.clear_sensitive();
                self.screen = Screen::Form;
            }
            KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        let metrics = match self.form_state.to_metrics() {
            Ok(metrics) => metrics,
            Err(e) => {
                self.form_state.error_message = Some(e);
                return;
            }
        };
        if let Err(errors) = metrics.validate() {
            let error = HealthError::Validation(errors.join(", "));
            tracing::debug!("Rejected form submission");
            self.form_state.error_message = Some(error.to_string());
            return;
        }

        self.screen = Screen::Result;
        self.submitted = Some(metrics);
        self.set_phase(AssessmentPhase::Preparing);

        let worker = AssessmentWorker::spawn(self.service.clone(), metrics);
        self.pending_worker = Some(worker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::CannedGenerator;
    use crate::ports::GenerationError;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    fn app_with(generator: CannedGenerator) -> App {
        let generator: Arc<dyn TextGenerator> = Arc::new(generator);
        App::with_dependencies(AssessmentService::new(generator))
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    fn wait_for_result(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.pending_worker.is_some() {
            assert!(Instant::now() < deadline, "Worker did not finish");
            app.poll_worker();
            app.tick_progress();
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    fn rendered(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).expect("Test terminal");
        terminal.draw(|f| app.draw(f)).expect("Draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_submit_sample_shows_response() {
        let mut app = app_with(CannedGenerator::new("Risk level: 1 (Low)"));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Result);

        wait_for_result(&mut app);
        let text = rendered(&app);
        assert!(text.contains("Health Assessment Result"));
        assert!(text.contains("Risk level: 1 (Low)"));
        assert!(text.contains("BMI: 26.6"));
        assert!(text.contains("DISCLAIMER"));
    }

    #[test]
    fn test_failure_is_displayed_not_raised() {
        let mut app = app_with(CannedGenerator::failing(GenerationError::Connection(
            "https://example.invalid".into(),
        )));
        press(&mut app, KeyCode::Enter);
        wait_for_result(&mut app);

        let ResultState::Complete { assessment, .. } = &app.result_state else {
            panic!("Expected a completed assessment");
        };
        assert!(assessment
            .display_text()
            .starts_with("Error in generating response:"));
    }

    #[test]
    fn test_invalid_age_stays_on_form() {
        let mut app = app_with(CannedGenerator::new("unused"));
        for c in "121".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen(), Screen::Form);
        assert!(app.form_state.error_message.is_some());
        assert!(app.pending_worker.is_none());
    }

    #[test]
    fn test_enter_keeps_values_and_n_clears() {
        let mut app = app_with(CannedGenerator::new("ok"));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Enter);
        wait_for_result(&mut app);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Form);
        assert_eq!(app.form_state.fields[0].value, "45");

        press(&mut app, KeyCode::Enter);
        wait_for_result(&mut app);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.screen(), Screen::Form);
        assert!(app.form_state.fields.iter().all(|f| f.value.is_empty()));
    }

    #[test]
    fn test_keys_ignored_while_pending() {
        let mut app = app_with(CannedGenerator::new("ok"));
        app.screen = Screen::Result;
        app.result_state = ResultState::Awaiting { progress: 0.5 };

        press(&mut app, KeyCode::Esc);
        assert!(!app.should_quit);

        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_escape_on_form_quits() {
        let mut app = app_with(CannedGenerator::new("ok"));
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }
}
