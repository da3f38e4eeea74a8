//! leukodx-intake — Field validation and feature-vector assembly for the intake panel.

pub mod assemble;
pub mod validate;

pub use assemble::{assemble_observation, AssembleError};
pub use validate::{validate_fields, AbnormalValue, FieldIssue, IssueKind, ValidationReport};
