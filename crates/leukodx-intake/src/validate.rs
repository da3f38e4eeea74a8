//! Per-field intake validation against the reference-range table.
//!
//! Validation is a pure function of the submitted fields: re-running it on
//! every change yields a fresh report that fully replaces the previous one,
//! so no error state ever accumulates. Blocking issues (format and the WBC
//! intake floor) stop a submission; abnormal findings are advisory and only
//! drive highlighting.

use std::collections::HashMap;

use serde::Serialize;

use leukodx_common::ranges::{REFERENCE_RANGES, WBC_FLOOR_FIELD, WBC_INTAKE_FLOOR};

/// How a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// The raw text does not parse as a finite number.
    Format,
    /// The value parses but violates a domain bound.
    Range,
}

/// One blocking issue, surfaced inline at the field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub kind: IssueKind,
    pub message: String,
}

/// Abnormal-but-valid value. Advisory only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbnormalValue {
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub normal_min: f64,
    pub normal_max: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<FieldIssue>,
    pub abnormal: Vec<AbnormalValue>,
}

impl ValidationReport {
    /// True when submission may proceed.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Validate every submitted field that has a reference range.
///
/// Absent fields are the assembler's concern; fields outside the panel are
/// ignored. The WBC floor violation does not suppress abnormal-flag
/// computation for that field — it only blocks submission.
pub fn validate_fields(fields: &HashMap<String, String>) -> ValidationReport {
    let mut report = ValidationReport::default();

    for spec in &REFERENCE_RANGES {
        let Some(raw) = fields.get(spec.name) else {
            continue;
        };

        let parsed = raw.trim().parse::<f64>().ok().filter(|v| v.is_finite());
        let Some(value) = parsed else {
            report.issues.push(FieldIssue {
                field: spec.name.to_string(),
                kind: IssueKind::Format,
                message: format!("'{}' is not a number", raw.trim()),
            });
            continue;
        };

        if spec.name == WBC_FLOOR_FIELD && value < WBC_INTAKE_FLOOR {
            report.issues.push(FieldIssue {
                field: spec.name.to_string(),
                kind: IssueKind::Range,
                message: format!("WBC count must be ≥ {WBC_INTAKE_FLOOR:.0}k for accurate results"),
            });
        }

        if spec.is_abnormal(value) {
            report.abnormal.push(AbnormalValue {
                name: spec.name.to_string(),
                value,
                unit: spec.unit.to_string(),
                normal_min: spec.normal_min,
                normal_max: spec.normal_max,
            });
        }
    }

    report
}
