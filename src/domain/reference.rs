//! Static normal-range table shown next to the model's answer.
//!
//! Display only; nothing in the crate computes against these values.

use serde::Serialize;

/// One row of the reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferenceRange {
    pub parameter: &'static str,
    pub normal_range: &'static str,
}

const REFERENCE_TABLE: [ReferenceRange; 4] = [
    ReferenceRange {
        parameter: "BMI",
        normal_range: "18.5 - 24.9",
    },
    ReferenceRange {
        parameter: "Systolic Blood Pressure",
        normal_range: "90 - 120 mm Hg",
    },
    ReferenceRange {
        parameter: "Diastolic Blood Pressure",
        normal_range: "60 - 80 mm Hg",
    },
    ReferenceRange {
        parameter: "Heart Rate",
        normal_range: "60 - 100 bpm",
    },
];

/// The fixed parameter → normal range rows, in display order.
#[must_use]
pub fn reference_table() -> &'static [ReferenceRange] {
    &REFERENCE_TABLE
}

impl ReferenceRange {
    /// Find a row by parameter name (case-insensitive).
    #[must_use]
    pub fn lookup(parameter: &str) -> Option<&'static ReferenceRange> {
        REFERENCE_TABLE
            .iter()
            .find(|r| r.parameter.eq_ignore_ascii_case(parameter.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_contents() {
        let table = reference_table();
        assert_eq!(table.len(), 4);
        assert_eq!(table[0].parameter, "BMI");
        assert_eq!(table[0].normal_range, "18.5 - 24.9");
    }

    #[test]
    fn test_lookup() {
        let hr = ReferenceRange::lookup("heart rate").expect("Row exists");
        assert_eq!(hr.normal_range, "60 - 100 bpm");
        assert!(ReferenceRange::lookup("Cholesterol").is_none());
    }
}
