//! Health metric input record and the derived BMI.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound accepted by the age field.
pub const MAX_AGE: u32 = 120;

/// Biological sex as offered by the form selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    /// Flip between the two options.
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Male,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "Male"),
            Self::Female => write!(f, "Female"),
        }
    }
}

/// Values collected from the user for one assessment.
///
/// Unsigned fields already encode the "non-negative" clamp of the form
/// widgets; the floats are checked by [`HealthMetrics::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HealthMetrics {
    /// Age in years (0-120)
    pub age: u32,

    pub sex: Sex,

    /// Systolic blood pressure in mm Hg
    pub systolic_bp: u32,

    /// Diastolic blood pressure in mm Hg
    pub diastolic_bp: u32,

    /// Resting heart rate in bpm
    pub heart_rate: u32,

    /// Weight in kilograms
    pub weight_kg: f64,

    /// Height in centimetres
    pub height_cm: f64,
}

impl HealthMetrics {
    /// Body Mass Index: weight (kg) divided by height (m) squared.
    ///
    /// Returns `None` when height is zero.
    #[must_use]
    pub fn bmi(&self) -> Option<f64> {
        if self.height_cm == 0.0 {
            return None;
        }
        let height_m = self.height_cm / 100.0;
        Some(self.weight_kg / (height_m * height_m))
    }

    /// Check the same range clamps the input widgets enforce.
    ///
    /// There is deliberately no cross-field validation (a diastolic value
    /// above the systolic one is passed through to the model as-is).
    ///
    /// # Errors
    /// Returns every violation found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.age > MAX_AGE {
            errors.push(format!("Age {} out of range [0, {MAX_AGE}]", self.age));
        }
        if !self.weight_kg.is_finite() || self.weight_kg < 0.0 {
            errors.push(format!("Weight {} must be a non-negative number", self.weight_kg));
        }
        if !self.height_cm.is_finite() || self.height_cm < 0.0 {
            errors.push(format!("Height {} must be a non-negative number", self.height_cm));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Sample record used by the form's sample-data shortcut.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            age: 45,
            sex: Sex::Female,
            systolic_bp: 128,
            diastolic_bp: 84,
            heart_rate: 76,
            weight_kg: 72.5,
            height_cm: 165.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_formula() {
        let metrics = HealthMetrics {
            weight_kg: 70.0,
            height_cm: 175.0,
            ..Default::default()
        };
        let bmi = metrics.bmi().expect("Height is non-zero");
        assert!((bmi - 22.857_142_857).abs() < 1e-6);
    }

    #[test]
    fn test_bmi_undefined_for_zero_height() {
        let metrics = HealthMetrics {
            weight_kg: 80.0,
            height_cm: 0.0,
            ..Default::default()
        };
        assert!(metrics.bmi().is_none());
    }

    #[test]
    fn test_bmi_zero_weight() {
        let metrics = HealthMetrics {
            weight_kg: 0.0,
            height_cm: 180.0,
            ..Default::default()
        };
        assert_eq!(metrics.bmi(), Some(0.0));
    }

    #[test]
    fn test_validation() {
        assert!(HealthMetrics::sample().validate().is_ok());
        assert!(HealthMetrics::default().validate().is_ok());

        let invalid = HealthMetrics {
            age: 121,
            weight_kg: -1.0,
            height_cm: f64::NAN,
            ..Default::default()
        };
        let errors = invalid.validate().expect_err("Should reject");
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_no_cross_field_validation() {
        let metrics = HealthMetrics {
            systolic_bp: 60,
            diastolic_bp: 140,
            ..Default::default()
        };
        assert!(metrics.validate().is_ok());
    }

    #[test]
    fn test_sex_toggle_and_display() {
        assert_eq!(Sex::Male.toggle(), Sex::Female);
        assert_eq!(Sex::Female.toggle(), Sex::Male);
        assert_eq!(Sex::Female.to_string(), "Female");
    }
}
