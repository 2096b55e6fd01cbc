//! Assessment result types.
//!
//! Represents what came back from the text-generation model for one
//! submission. The response is kept as free text.

use serde::{Deserialize, Serialize};

use super::metrics::HealthMetrics;

/// Prefix of every user-visible generation failure.
pub const ERROR_PREFIX: &str = "Error in generating response:";

/// Ordinal risk band the model is asked to report.
///
/// Never computed locally; it only feeds the response-format line of the
/// prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [Self::Low, Self::Moderate, Self::High];

    /// 1-based ordinal used in the prompt's scale.
    #[must_use]
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Moderate => 2,
            Self::High => 3,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.ordinal(), self.label())
    }
}

/// What the model call produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssessmentOutcome {
    /// Raw model text, unparsed
    Response(String),
    /// The call failed; holds the error description
    Failed(String),
}

impl AssessmentOutcome {
    /// Text shown to the user: the response verbatim, or the prefixed error.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            Self::Response(text) => text.clone(),
            Self::Failed(error) => format!("{ERROR_PREFIX} {error}"),
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// One completed submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    /// Random identifier, used only to correlate log lines
    pub id: String,

    pub metrics: HealthMetrics,

    /// Derived BMI (`None` when height is zero)
    pub bmi: Option<f64>,

    /// Exact prompt forwarded to the model
    pub prompt: String,

    /// Model identifier that answered (or failed)
    pub model: String,

    pub outcome: AssessmentOutcome,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Assessment {
    /// Create a new assessment record.
    #[must_use]
    pub fn new(
        metrics: HealthMetrics,
        prompt: String,
        model: impl Into<String>,
        outcome: AssessmentOutcome,
    ) -> Self {
        Self {
            id: uuid_v4(),
            bmi: metrics.bmi(),
            metrics,
            prompt,
            model: model.into(),
            outcome,
            created_at: chrono::Utc::now(),
        }
    }

    /// Shorthand for `self.outcome.display_text()`.
    #[must_use]
    pub fn display_text(&self) -> String {
        self.outcome.display_text()
    }
}

/// Generate a random UUID v4 string.
fn uuid_v4() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_outcome_is_prefixed() {
        let outcome = AssessmentOutcome::Failed("connection refused".to_string());
        assert_eq!(
            outcome.display_text(),
            "Error in generating response: connection refused"
        );
        assert!(outcome.is_failure());
    }

    #[test]
    fn test_response_passed_through_verbatim() {
        let text = "Risk Level: 1 (Low)\nRecommendation: keep it up.";
        let outcome = AssessmentOutcome::Response(text.to_string());
        assert_eq!(outcome.display_text(), text);
        assert!(!outcome.is_failure());
    }

    #[test]
    fn test_assessment_derives_bmi() {
        let metrics = HealthMetrics::sample();
        let assessment = Assessment::new(
            metrics,
            "prompt".to_string(),
            "test-model",
            AssessmentOutcome::Response("ok".to_string()),
        );
        assert_eq!(assessment.bmi, metrics.bmi());
        assert_eq!(assessment.model, "test-model");
    }

    #[test]
    fn test_risk_level_scale() {
        let labels: Vec<String> = RiskLevel::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["1 (Low)", "2 (Moderate)", "3 (High)"]);
        assert!(RiskLevel::Low < RiskLevel::High);
    }

    #[test]
    fn test_uuid_generation() {
        let id1 = uuid_v4();
        let id2 = uuid_v4();
        assert_ne!(id1, id2);
        assert_eq!(id1.len(), 36);
        assert_eq!(&id1[14..15], "4");
    }
}
