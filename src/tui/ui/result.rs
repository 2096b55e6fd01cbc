//! Assessment progress and result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::prompt::format_bmi;
use crate::domain::Assessment;
use crate::tui::styles::MedicalTheme;

use super::reference::render_reference_table;

/// Result screen state
#[derive(Debug, Clone, Default)]
pub enum ResultState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// Building the prompt
    Preparing { progress: f64 },
    /// Waiting for the model to answer
    Awaiting { progress: f64 },
    /// Finished; `scroll` is the first visible line of the response
    Complete {
        assessment: Box<Assessment>,
        scroll: u16,
    },
}

impl ResultState {
    #[must_use]
    pub fn progress(&self) -> Option<f64> {
        match self {
            Self::Preparing { progress } | Self::Awaiting { progress } => Some(*progress),
            _ => None,
        }
    }

    pub fn scroll_down(&mut self) {
        if let Self::Complete { scroll, .. } = self {
            *scroll = scroll.saturating_add(1);
        }
    }

    pub fn scroll_up(&mut self) {
        if let Self::Complete { scroll, .. } = self {
            *scroll = scroll.saturating_sub(1);
        }
    }
}

/// Render the result screen
pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_result_header(f, chunks[0]);
    match state {
        ResultState::Idle => render_idle(f, chunks[1]),
        ResultState::Preparing { progress } => {
            render_progress(f, chunks[1], "Preparing", *progress, "Building prompt from your data...")
        }
        ResultState::Awaiting { progress } => {
            render_progress(f, chunks[1], "Assessing", *progress, "Waiting for the model to respond...")
        }
        ResultState::Complete { assessment, scroll } => {
            render_complete(f, chunks[1], assessment, *scroll)
        }
    }
    render_result_footer(f, chunks[2], state);
}

fn render_result_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Health Assessment Result", MedicalTheme::title()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_idle(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "No assessment yet",
            MedicalTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_progress(f: &mut Frame, area: Rect, stage: &str, progress: f64, description: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .margin(2)
        .split(area);

    let stage_text = Paragraph::new(Line::from(vec![
        Span::styled("Stage: ", MedicalTheme::text_secondary()),
        Span::styled(stage, MedicalTheme::focused()),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(stage_text, chunks[0]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(MedicalTheme::info())
        .ratio(progress.clamp(0.0, 1.0))
        .label(format!("{:.0}%", progress * 100.0));
    f.render_widget(gauge, chunks[1]);

    let desc = Paragraph::new(Line::from(Span::styled(
        description,
        MedicalTheme::text_muted(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(desc, chunks[2]);
}

fn render_complete(f: &mut Frame, area: Rect, assessment: &Assessment, scroll: u16) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    let failed = assessment.outcome.is_failure();
    let (border_style, text_style) = if failed {
        (MedicalTheme::danger(), MedicalTheme::danger())
    } else {
        (MedicalTheme::border_focused(), MedicalTheme::text())
    };

    let display = assessment.display_text();
    let lines: Vec<Line> = display
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), text_style)))
        .collect();

    let response = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .title(Span::styled(
                    format!(" Model Response ({}) ", assessment.model),
                    MedicalTheme::subtitle(),
                ))
                .borders(Borders::ALL)
                .border_style(border_style),
        );
    f.render_widget(response, columns[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(columns[1]);

    let summary = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(" BMI: ", MedicalTheme::text_secondary()),
            Span::styled(format_bmi(assessment.bmi), MedicalTheme::text()),
        ]),
        Line::from(vec![
            Span::styled(" Submitted: ", MedicalTheme::text_secondary()),
            Span::styled(
                assessment.created_at.format("%H:%M:%S UTC").to_string(),
                MedicalTheme::text_muted(),
            ),
        ]),
    ])
    .block(
        Block::default()
            .title(Span::styled(" Your Values ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(summary, side[0]);

    render_reference_table(f, side[1]);
}

fn render_result_footer(f: &mut Frame, area: Rect, state: &ResultState) {
    let content = match state {
        ResultState::Complete { .. } => Line::from(vec![
            Span::styled("[↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Scroll ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Edit Values ", MedicalTheme::key_desc()),
            Span::styled("[N] ", MedicalTheme::key_hint()),
            Span::styled("New Assessment ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Quit", MedicalTheme::key_desc()),
        ]),
        _ => Line::from(vec![Span::styled(
            "Processing...",
            MedicalTheme::text_muted(),
        )]),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
