//! Health data input form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::prompt::format_bmi;
use crate::domain::{HealthMetrics, Sex, MAX_AGE};
use crate::tui::styles::MedicalTheme;

/// What a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Whole number with an optional upper bound
    Integer { max: Option<u32> },
    /// Non-negative decimal shown with one decimal place
    Decimal,
    /// Male / Female selector
    Sex,
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub hint: &'static str,
    pub kind: FieldKind,
    pub value: String,
}

impl FormField {
    fn integer(label: &'static str, hint: &'static str, max: Option<u32>) -> Self {
        Self {
            label,
            hint,
            kind: FieldKind::Integer { max },
            value: String::new(),
        }
    }

    fn decimal(label: &'static str, hint: &'static str) -> Self {
        Self {
            label,
            hint,
            kind: FieldKind::Decimal,
            value: String::new(),
        }
    }

    fn parse_integer(&self) -> Result<u32, String> {
        if self.value.is_empty() {
            return Ok(0);
        }
        let value: u32 = self
            .value
            .parse()
            .map_err(|_| format!("{}: Invalid whole number", self.label))?;
        if let FieldKind::Integer { max: Some(max) } = self.kind {
            if value > max {
                return Err(format!("{}: Value must be between 0 and {max}", self.label));
            }
        }
        Ok(value)
    }

    fn parse_decimal(&self) -> Result<f64, String> {
        if self.value.is_empty() {
            return Ok(0.0);
        }
        self.value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .ok_or_else(|| format!("{}: Invalid number", self.label))
    }
}

const AGE: usize = 0;
const SEX: usize = 1;
const SYSTOLIC: usize = 2;
const DIASTOLIC: usize = 3;
const HEART_RATE: usize = 4;
const WEIGHT: usize = 5;
const HEIGHT: usize = 6;

/// Assessment form state
pub struct AssessmentFormState {
    pub fields: Vec<FormField>,
    pub sex: Sex,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Default for AssessmentFormState {
    fn default() -> Self {
        Self {
            fields: vec![
                FormField::integer("Age", "years (0-120)", Some(MAX_AGE)),
                FormField {
                    label: "Sex",
                    hint: "←/→ to change",
                    kind: FieldKind::Sex,
                    value: String::new(),
                },
                FormField::integer("Systolic BP", "mm Hg", None),
                FormField::integer("Diastolic BP", "mm Hg", None),
                FormField::integer("Heart Rate", "bpm", None),
                FormField::decimal("Weight", "kg"),
                FormField::decimal("Height", "cm"),
            ],
            sex: Sex::default(),
            selected_field: 0,
            error_message: None,
        }
    }
}

impl AssessmentFormState {
    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    fn current_kind(&self) -> FieldKind {
        self.fields[self.selected_field].kind
    }

    /// Whether the cursor is on the sex selector
    #[must_use]
    pub fn on_selector(&self) -> bool {
        self.current_kind() == FieldKind::Sex
    }

    /// Flip the sex selector (only when it is focused)
    pub fn toggle_sex(&mut self) {
        if self.on_selector() {
            self.sex = self.sex.toggle();
            self.error_message = None;
        }
    }

    /// Add a character to the current field
    pub fn input_char(&mut self, c: char) {
        match self.current_kind() {
            FieldKind::Sex => match c.to_ascii_lowercase() {
                'm' => self.sex = Sex::Male,
                'f' => self.sex = Sex::Female,
                ' ' => self.sex = self.sex.toggle(),
                _ => return,
            },
            FieldKind::Integer { .. } => {
                if !c.is_ascii_digit() {
                    return;
                }
                self.fields[self.selected_field].value.push(c);
            }
            FieldKind::Decimal => {
                let value = &mut self.fields[self.selected_field].value;
                if !(c.is_ascii_digit() || (c == '.' && !value.contains('.'))) {
                    return;
                }
                value.push(c);
            }
        }
        self.error_message = None;
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        self.fields[self.selected_field].value.pop();
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        self.fields[self.selected_field].value.clear();
    }

    /// Wipe all field buffers and reset the cursor.
    pub fn clear_sensitive(&mut self) {
        for field in &mut self.fields {
            field.value.zeroize();
        }
        self.sex = Sex::default();
        self.error_message = None;
        self.selected_field = 0;
    }

    /// Parse the fields into a metrics record.
    ///
    /// Empty fields count as 0, the default of every numeric input.
    pub fn to_metrics(&self) -> Result<HealthMetrics, String> {
        Ok(HealthMetrics {
            age: self.fields[AGE].parse_integer()?,
            sex: self.sex,
            systolic_bp: self.fields[SYSTOLIC].parse_integer()?,
            diastolic_bp: self.fields[DIASTOLIC].parse_integer()?,
            heart_rate: self.fields[HEART_RATE].parse_integer()?,
            weight_kg: self.fields[WEIGHT].parse_decimal()?,
            height_cm: self.fields[HEIGHT].parse_decimal()?,
        })
    }

    /// BMI for the values typed so far, if they parse.
    #[must_use]
    pub fn preview_bmi(&self) -> Option<f64> {
        let weight = self.fields[WEIGHT].parse_decimal().ok()?;
        let height = self.fields[HEIGHT].parse_decimal().ok()?;
        HealthMetrics {
            weight_kg: weight,
            height_cm: height,
            ..Default::default()
        }
        .bmi()
    }

    /// Fill the form with the sample record
    pub fn load_sample_data(&mut self) {
        let sample = HealthMetrics::sample();
        self.fields[AGE].value = sample.age.to_string();
        self.sex = sample.sex;
        self.fields[SYSTOLIC].value = sample.systolic_bp.to_string();
        self.fields[DIASTOLIC].value = sample.diastolic_bp.to_string();
        self.fields[HEART_RATE].value = sample.heart_rate.to_string();
        self.fields[WEIGHT].value = format!("{:.1}", sample.weight_kg);
        self.fields[HEIGHT].value = format!("{:.1}", sample.height_cm);
        self.error_message = None;
    }
}

/// Render the health data input form
pub fn render_assessment_form(f: &mut Frame, area: Rect, state: &AssessmentFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(2), // BMI preview
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], state);
    render_bmi_preview(f, chunks[2], state);
    render_form_footer(f, chunks[3], state);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Health Assessment Tool", MedicalTheme::title()),
        Span::styled(" │ Enter Your Health Data", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &AssessmentFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (state.fields.len() + 1) / 2;

    render_field_column(f, columns[0], state, 0..mid);
    render_field_column(f, columns[1], state, mid..state.fields.len());
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    state: &AssessmentFormState,
    range: std::ops::Range<usize>,
) {
    let constraints: Vec<Constraint> = range
        .clone()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (slot, index) in range.enumerate() {
        let field = &state.fields[index];
        let is_selected = index == state.selected_field;

        let (border_style, title_style) = if is_selected {
            (MedicalTheme::border_focused(), MedicalTheme::focused())
        } else {
            (MedicalTheme::border(), MedicalTheme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value_display = match field.kind {
            FieldKind::Sex => Span::styled(format!("◀ {} ▶", state.sex), MedicalTheme::text()),
            _ if field.value.is_empty() => Span::styled(field.hint, MedicalTheme::text_muted()),
            _ => Span::styled(field.value.as_str(), MedicalTheme::text()),
        };

        let content = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            value_display,
            if is_selected && field.kind != FieldKind::Sex {
                Span::styled("▌", MedicalTheme::cursor())
            } else {
                Span::raw("")
            },
        ]))
        .block(block);

        f.render_widget(content, chunks[slot]);
    }
}

fn render_bmi_preview(f: &mut Frame, area: Rect, state: &AssessmentFormState) {
    let line = Line::from(vec![
        Span::styled("  BMI: ", MedicalTheme::text_secondary()),
        Span::styled(format_bmi(state.preview_bmi()), MedicalTheme::text()),
        Span::styled("  (weight / height in metres²)", MedicalTheme::text_muted()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &AssessmentFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.clone(), MedicalTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Navigate ", MedicalTheme::key_desc()),
            Span::styled("[←→] ", MedicalTheme::key_hint()),
            Span::styled("Sex ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Assess Health ", MedicalTheme::key_desc()),
            Span::styled("[S] ", MedicalTheme::key_hint()),
            Span::styled("Sample Data ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Quit", MedicalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(state: &mut AssessmentFormState, field: usize, text: &str) {
        state.selected_field = field;
        for c in text.chars() {
            state.input_char(c);
        }
    }

    #[test]
    fn test_empty_form_is_all_zero() {
        let state = AssessmentFormState::default();
        let metrics = state.to_metrics().expect("Empty parses");
        assert_eq!(metrics, HealthMetrics::default());
        assert!(state.preview_bmi().is_none());
    }

    #[test]
    fn test_typed_values() {
        let mut state = AssessmentFormState::default();
        type_into(&mut state, AGE, "41");
        type_into(&mut state, SEX, "f");
        type_into(&mut state, SYSTOLIC, "122");
        type_into(&mut state, DIASTOLIC, "79");
        type_into(&mut state, HEART_RATE, "70");
        type_into(&mut state, WEIGHT, "80.5");
        type_into(&mut state, HEIGHT, "181");

        let metrics = state.to_metrics().expect("Valid");
        assert_eq!(metrics.age, 41);
        assert_eq!(metrics.sex, Sex::Female);
        assert_eq!(metrics.systolic_bp, 122);
        assert!((metrics.weight_kg - 80.5).abs() < f64::EPSILON);
        assert!(state.preview_bmi().is_some());
    }

    #[test]
    fn test_rejects_non_numeric_chars() {
        let mut state = AssessmentFormState::default();
        type_into(&mut state, AGE, "4x-2.");
        assert_eq!(state.fields[AGE].value, "42");

        type_into(&mut state, WEIGHT, "7.2.5-");
        assert_eq!(state.fields[WEIGHT].value, "7.25");
    }

    #[test]
    fn test_age_upper_bound() {
        let mut state = AssessmentFormState::default();
        type_into(&mut state, AGE, "121");
        let err = state.to_metrics().expect_err("Out of range");
        assert!(err.starts_with("Age:"));
    }

    #[test]
    fn test_lone_decimal_point_is_invalid() {
        let mut state = AssessmentFormState::default();
        type_into(&mut state, HEIGHT, ".");
        let err = state.to_metrics().expect_err("Not a number");
        assert_eq!(err, "Height: Invalid number");
    }

    #[test]
    fn test_toggle_only_on_selector() {
        let mut state = AssessmentFormState::default();
        state.toggle_sex();
        assert_eq!(state.sex, Sex::Male);

        state.selected_field = SEX;
        state.toggle_sex();
        assert_eq!(state.sex, Sex::Female);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut state = AssessmentFormState::default();
        state.prev_field();
        assert_eq!(state.selected_field, HEIGHT);
        state.next_field();
        assert_eq!(state.selected_field, AGE);
    }

    #[test]
    fn test_sample_and_clear() {
        let mut state = AssessmentFormState::default();
        state.load_sample_data();
        assert_eq!(state.to_metrics().expect("Sample parses"), HealthMetrics::sample());

        state.clear_sensitive();
        assert!(state.fields.iter().all(|f| f.value.is_empty()));
        assert_eq!(state.selected_field, 0);
    }
}
