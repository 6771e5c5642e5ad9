//! Validation error reporting types.
//!
//! A `ValidationError` is a value, not an exception: rule violations are
//! collected and reported, they never abort a run. Only true I/O failures
//! are caught at the file boundary and normalized into the `System` category.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error taxonomy. Every reported error falls into exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Malformed line or wrong field count; fatal only for that line.
    Structural,
    /// A field violates its format constraint.
    FieldFormat,
    /// A dependent record references an unknown invoice or patient.
    Referential,
    /// Duplicate invoice, patient, or attention.
    Integrity,
    /// Cross-field semantic mismatch; advisory.
    Coherence,
    /// File-level I/O or decode failure, converted to one file-scoped error.
    System,
}

impl ErrorCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::FieldFormat => "field_format",
            Self::Referential => "referential",
            Self::Integrity => "integrity",
            Self::Coherence => "coherence",
            Self::System => "system",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One reported validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Name of the source file the record came from.
    pub source_file: String,
    /// 1-based line number within the file; 0 for file-scoped errors.
    pub record_index: usize,
    /// Field name(s), slash-separated when the rule spans fields.
    pub field_name: String,
    /// Human-readable description of the violation.
    pub description: String,
    /// The regulation or rule the violation cites.
    pub cited_rule: String,
    /// Suggested manual fix.
    pub suggested_fix: String,
    /// Taxonomy category.
    pub category: ErrorCategory,
}

impl ValidationError {
    pub fn new(
        source_file: impl Into<String>,
        record_index: usize,
        field_name: impl Into<String>,
        description: impl Into<String>,
        cited_rule: impl Into<String>,
        suggested_fix: impl Into<String>,
        category: ErrorCategory,
    ) -> Self {
        Self {
            source_file: source_file.into(),
            record_index,
            field_name: field_name.into(),
            description: description.into(),
            cited_rule: cited_rule.into(),
            suggested_fix: suggested_fix.into(),
            category,
        }
    }

    /// File-scoped error for an I/O or decode failure.
    pub fn system(
        source_file: impl Into<String>,
        description: impl Into<String>,
        suggested_fix: impl Into<String>,
    ) -> Self {
        Self::new(
            source_file,
            0,
            "archivo",
            description,
            "Sistema",
            suggested_fix,
            ErrorCategory::System,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorCategory::FieldFormat).unwrap();
        assert_eq!(json, "\"field_format\"");
    }

    #[test]
    fn test_system_error_is_file_scoped() {
        let error = ValidationError::system("AC0001.txt", "unreadable", "check permissions");
        assert_eq!(error.record_index, 0);
        assert_eq!(error.category, ErrorCategory::System);
        assert_eq!(error.field_name, "archivo");
    }
}
