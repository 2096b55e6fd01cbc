//! Prompt template sent to the text-generation model.
//!
//! The rubric thresholds are embedded as literal text; the model does the
//! categorisation, this module only formats.

use std::fmt::Write as _;

use super::assessment::RiskLevel;
use super::metrics::HealthMetrics;

/// Category boundaries the model is asked to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rubric {
    pub bmi_low: (f64, f64),
    pub bmi_moderate: (f64, f64),
    /// BMI at or above this is high risk (as is anything below `bmi_low.0`)
    pub bmi_high_from: f64,

    pub systolic_low: (u32, u32),
    pub diastolic_low: (u32, u32),
    pub systolic_moderate: (u32, u32),
    pub diastolic_moderate: (u32, u32),
    pub systolic_high_from: u32,
    pub diastolic_high_from: u32,

    pub heart_rate_low: (u32, u32),
    pub heart_rate_moderate: (u32, u32),
    /// Resting heart rate strictly above this is high risk
    pub heart_rate_high_above: u32,
}

impl Rubric {
    pub const STANDARD: Rubric = Rubric {
        bmi_low: (18.5, 24.9),
        bmi_moderate: (25.0, 29.9),
        bmi_high_from: 30.0,

        systolic_low: (90, 120),
        diastolic_low: (60, 80),
        systolic_moderate: (121, 139),
        diastolic_moderate: (81, 89),
        systolic_high_from: 140,
        diastolic_high_from: 90,

        heart_rate_low: (60, 100),
        heart_rate_moderate: (101, 110),
        heart_rate_high_above: 110,
    };

    /// Render the "Health Status Categorization" section.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "### Health Status Categorization\n\
             Define the user's health status risk level based on the following criteria:\n\
             1. *BMI (Body Mass Index)*:\n   \
             - Low risk: {} - {}\n   \
             - Moderate risk: {} - {}\n   \
             - High risk: below {} (underweight) or {} and above (overweight/obese)\n\n",
            self.bmi_low.0,
            self.bmi_low.1,
            self.bmi_moderate.0,
            self.bmi_moderate.1,
            self.bmi_low.0,
            self.bmi_high_from,
        );
        let _ = write!(
            out,
            "2. *Blood Pressure*:\n   \
             - Low risk: Systolic ({}-{} mm Hg) and Diastolic ({}-{} mm Hg)\n   \
             - Moderate risk: Systolic ({}-{} mm Hg) or Diastolic ({}-{} mm Hg)\n   \
             - High risk: Systolic ({} mm Hg or higher) or Diastolic ({} mm Hg or higher)\n\n",
            self.systolic_low.0,
            self.systolic_low.1,
            self.diastolic_low.0,
            self.diastolic_low.1,
            self.systolic_moderate.0,
            self.systolic_moderate.1,
            self.diastolic_moderate.0,
            self.diastolic_moderate.1,
            self.systolic_high_from,
            self.diastolic_high_from,
        );
        let _ = write!(
            out,
            "3. *Heart Rate*:\n   \
             - Low risk: Resting heart rate of {}-{} bpm\n   \
             - Moderate risk: Resting heart rate of {}-{} bpm\n   \
             - High risk: Resting heart rate above {} bpm\n\n",
            self.heart_rate_low.0,
            self.heart_rate_low.1,
            self.heart_rate_moderate.0,
            self.heart_rate_moderate.1,
            self.heart_rate_high_above,
        );
        out
    }
}

impl Default for Rubric {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Text used for the BMI line when height is zero.
pub const BMI_UNAVAILABLE: &str = "not available (height is 0)";

const PREAMBLE: &str = "You are a professional healthcare advisor. Based on the provided health \
parameters, categorize the user's health status into risk levels and provide a recommendation.\n\n";

const EXAMPLE_RESPONSE: &str = "### Example Response\n\
Risk Level: 2 (Moderate)\n\
Recommendation: 'Your blood pressure and BMI are slightly elevated. Consider regular monitoring \
and lifestyle changes. Consultation with a healthcare provider is recommended for personalized \
advice.'\n\n\
Please analyze and provide a response following this format.";

/// Format a BMI value for display and for the prompt.
#[must_use]
pub fn format_bmi(bmi: Option<f64>) -> String {
    match bmi {
        Some(value) => format!("{value:.1}"),
        None => BMI_UNAVAILABLE.to_string(),
    }
}

/// Format a measurement exactly as entered; whole numbers keep one `.0`.
fn format_measure(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Build the prompt for one submission using the standard rubric.
#[must_use]
pub fn build_prompt(metrics: &HealthMetrics) -> String {
    build_prompt_with(metrics, &Rubric::STANDARD)
}

/// Build the prompt with an explicit rubric.
#[must_use]
pub fn build_prompt_with(metrics: &HealthMetrics, rubric: &Rubric) -> String {
    let mut out = String::from(PREAMBLE);

    let _ = write!(
        out,
        "User's Health Parameters:\n\
         - Age: {}\n\
         - Sex: {}\n\
         - Systolic Blood Pressure: {} mm Hg\n\
         - Diastolic Blood Pressure: {} mm Hg\n\
         - Heart Rate: {} bpm\n\
         - Weight: {} kg\n\
         - Height: {} cm\n\
         - BMI: {}\n\n",
        metrics.age,
        metrics.sex,
        metrics.systolic_bp,
        metrics.diastolic_bp,
        metrics.heart_rate,
        format_measure(metrics.weight_kg),
        format_measure(metrics.height_cm),
        format_bmi(metrics.bmi()),
    );

    out.push_str(&rubric.render());

    let scale = RiskLevel::ALL
        .iter()
        .map(|level| format!("{}: {}", level.ordinal(), level.label()))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = write!(
        out,
        "### Response Format\n\
         Please categorize the user's health status as follows:\n\
         - *Risk Level ({scale})*: Provide a risk level based on an analysis of the user's BMI, \
         blood pressure, and heart rate.\n\
         - *Recommendation*: Provide brief advice based on the categorized risk level.\n\n"
    );

    out.push_str(EXAMPLE_RESPONSE);
    out
}
