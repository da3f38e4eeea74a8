//! Reference ranges for the 13-parameter leukocytosis panel.
//!
//! The table is fixed at build time and read-only for the life of the
//! process. Normal bands drive advisory highlighting only; they never block
//! a submission.

use serde::Serialize;

/// Intake floor for the high-range WBC field, in k/μL. The classifier was
/// trained exclusively on presentations with WBC ≥ 50k; lower values are a
/// range violation, not a format violation.
pub const WBC_INTAKE_FLOOR: f64 = 50.0;

/// The field carrying the intake floor.
pub const WBC_FLOOR_FIELD: &str = "initial_wbc_50";

/// Display and normal bounds for one lab parameter.
/// Invariant: min ≤ normal_min ≤ normal_max ≤ max.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub normal_min: f64,
    pub normal_max: f64,
    pub unit: &'static str,
}

impl ParameterSpec {
    /// Advisory check: outside the normal band but still a legal value.
    pub fn is_abnormal(&self, value: f64) -> bool {
        value < self.normal_min || value > self.normal_max
    }

    pub fn is_consistent(&self) -> bool {
        self.min <= self.normal_min
            && self.normal_min <= self.normal_max
            && self.normal_max <= self.max
    }
}

/// The full intake panel. Any WBC ≥ 50k is by definition abnormal, so the
/// normal band for `initial_wbc_50` sits entirely below the intake floor.
pub const REFERENCE_RANGES: [ParameterSpec; 13] = [
    ParameterSpec { name: "age",             min: 0.0,  max: 120.0,  normal_min: 0.0,   normal_max: 120.0, unit: "years" },
    ParameterSpec { name: "ldh",             min: 0.0,  max: 1000.0, normal_min: 94.0,  normal_max: 250.0, unit: "IU/L" },
    ParameterSpec { name: "initial_wbc_50",  min: 0.0,  max: 200.0,  normal_min: 4.0,   normal_max: 10.0,  unit: "k/μL" },
    ParameterSpec { name: "initial_wbc_hosp", min: 0.0, max: 200.0,  normal_min: 4.0,   normal_max: 10.0,  unit: "k/μL" },
    ParameterSpec { name: "hgb",             min: 0.0,  max: 20.0,   normal_min: 11.0,  normal_max: 16.0,  unit: "g/dL" },
    ParameterSpec { name: "mcv",             min: 60.0, max: 120.0,  normal_min: 82.0,  normal_max: 98.0,  unit: "fL" },
    ParameterSpec { name: "platelets",       min: 0.0,  max: 1000.0, normal_min: 150.0, normal_max: 400.0, unit: "k/μL" },
    ParameterSpec { name: "neuts",           min: 0.0,  max: 100.0,  normal_min: 34.0,  normal_max: 71.0,  unit: "%" },
    ParameterSpec { name: "bands",           min: 0.0,  max: 30.0,   normal_min: 0.0,   normal_max: 5.0,   unit: "%" },
    ParameterSpec { name: "lymphs",          min: 0.0,  max: 100.0,  normal_min: 19.0,  normal_max: 53.0,  unit: "%" },
    ParameterSpec { name: "monos",           min: 0.0,  max: 30.0,   normal_min: 5.0,   normal_max: 13.0,  unit: "%" },
    ParameterSpec { name: "eos",             min: 0.0,  max: 20.0,   normal_min: 1.0,   normal_max: 7.0,   unit: "%" },
    ParameterSpec { name: "baso",            min: 0.0,  max: 5.0,    normal_min: 0.0,   normal_max: 1.0,   unit: "%" },
];

/// Look up one parameter by field name.
pub fn parameter(name: &str) -> Option<&'static ParameterSpec> {
    REFERENCE_RANGES.iter().find(|p| p.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_consistent() {
        for spec in &REFERENCE_RANGES {
            assert!(spec.is_consistent(), "inconsistent bounds for {}", spec.name);
        }
    }

    #[test]
    fn test_abnormal_band() {
        let ldh = parameter("ldh").unwrap();
        assert!(!ldh.is_abnormal(100.0));
        assert!(ldh.is_abnormal(300.0));
        assert!(ldh.is_abnormal(50.0));
        // Band edges are normal
        assert!(!ldh.is_abnormal(94.0));
        assert!(!ldh.is_abnormal(250.0));
    }

    #[test]
    fn test_wbc_floor_field_exists() {
        assert!(parameter(WBC_FLOOR_FIELD).is_some());
        // Any value at or above the intake floor is abnormal for this field
        assert!(parameter(WBC_FLOOR_FIELD).unwrap().is_abnormal(WBC_INTAKE_FLOOR));
    }

    #[test]
    fn test_unknown_parameter() {
        assert!(parameter("creatinine").is_none());
    }
}
