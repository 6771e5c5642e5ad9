//! Correction reporting types.
//!
//! Every mutation proposed by the auto-corrector is paired with a
//! `CorrectionRecord` carrying the original and corrected value. Nothing is
//! ever overwritten silently, and only `High` confidence corrections may be
//! substituted into output data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Self-assessed safety rating of a proposed correction.
///
/// The ordering matters: `High > Medium > Low`, and only `High` is ever
/// auto-applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// True when this correction may be substituted into output data.
    pub const fn is_auto_applicable(&self) -> bool {
        matches!(self, Self::High)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of transformation a correction rule performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionKind {
    /// Date rewritten into canonical DD/MM/YYYY.
    DateFormat,
    /// Whitespace trimmed/collapsed, name-like fields uppercased.
    TextNormalization,
    /// Stray characters stripped, decimal separator normalized.
    NumericFormat,
    /// Document type canonicalized via the synonym table.
    DocumentType,
    /// CUPS code padded or truncated to exactly six digits.
    CupsFormat,
    /// Invalid CIE10 code replaced by the catalog's first suggestion.
    Cie10Suggestion,
}

impl CorrectionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DateFormat => "date_format",
            Self::TextNormalization => "text_normalization",
            Self::NumericFormat => "numeric_format",
            Self::DocumentType => "document_type",
            Self::CupsFormat => "cups_format",
            Self::Cie10Suggestion => "cie10_suggestion",
        }
    }
}

impl fmt::Display for CorrectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Before/after record of one proposed (or applied) correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionRecord {
    pub source_file: String,
    /// 1-based line number within the file.
    pub record_index: usize,
    pub field_name: String,
    pub original_value: String,
    pub corrected_value: String,
    pub kind: CorrectionKind,
    pub confidence: Confidence,
    /// Why the corrector believes the change is right.
    pub rationale: String,
    pub timestamp: DateTime<Utc>,
}

impl CorrectionRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source_file: impl Into<String>,
        record_index: usize,
        field_name: impl Into<String>,
        original_value: impl Into<String>,
        corrected_value: impl Into<String>,
        kind: CorrectionKind,
        confidence: Confidence,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            source_file: source_file.into(),
            record_index,
            field_name: field_name.into(),
            original_value: original_value.into(),
            corrected_value: corrected_value.into(),
            kind,
            confidence,
            rationale: rationale.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_ordering() {
        assert!(Confidence::High > Confidence::Medium);
        assert!(Confidence::Medium > Confidence::Low);
        assert!(Confidence::High.is_auto_applicable());
        assert!(!Confidence::Medium.is_auto_applicable());
        assert!(!Confidence::Low.is_auto_applicable());
    }

    #[test]
    fn test_correction_record_carries_before_and_after() {
        let record = CorrectionRecord::new(
            "US0001.txt",
            3,
            "tipo_documento",
            "C.C",
            "CC",
            CorrectionKind::DocumentType,
            Confidence::High,
            "document type standardized",
        );
        assert_eq!(record.original_value, "C.C");
        assert_eq!(record.corrected_value, "CC");
        assert_eq!(record.confidence, Confidence::High);
    }
}
