//! Aggregated run output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::correction::CorrectionRecord;
use crate::error::{ErrorCategory, ValidationError};

/// Counters accumulated over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatistics {
    pub files_processed: usize,
    pub records_processed: usize,
    pub valid_records: usize,
    pub invalid_records: usize,
    /// CIE10 codes rejected by the catalog validator.
    pub cie10_invalid: usize,
    pub duplicate_attentions: usize,
    pub coherence_issues: usize,
    /// Corrections substituted into output data (auto-correct mode only).
    pub corrections_applied: usize,
    /// Files seen per kind code ("AF", "US", ...).
    pub files_by_kind: BTreeMap<String, usize>,
}

impl RunStatistics {
    pub fn record_file(&mut self, kind_code: &str) {
        self.files_processed += 1;
        *self.files_by_kind.entry(kind_code.to_string()).or_default() += 1;
    }
}

/// The engine's entire output: ordered errors, ordered corrections, and
/// run statistics. The engine itself writes no files; rendering is the
/// caller's concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub corrections: Vec<CorrectionRecord>,
    pub stats: RunStatistics,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Count of errors in a given category.
    pub fn count_by_category(&self, category: ErrorCategory) -> usize {
        self.errors
            .iter()
            .filter(|error| error.category == category)
            .count()
    }

    /// Errors grouped by source file, preserving report order within each.
    pub fn errors_by_file(&self) -> BTreeMap<&str, Vec<&ValidationError>> {
        let mut grouped: BTreeMap<&str, Vec<&ValidationError>> = BTreeMap::new();
        for error in &self.errors {
            grouped
                .entry(error.source_file.as_str())
                .or_default()
                .push(error);
        }
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_file_counts_by_kind() {
        let mut stats = RunStatistics::default();
        stats.record_file("AC");
        stats.record_file("AC");
        stats.record_file("US");
        assert_eq!(stats.files_processed, 3);
        assert_eq!(stats.files_by_kind.get("AC"), Some(&2));
        assert_eq!(stats.files_by_kind.get("US"), Some(&1));
    }

    #[test]
    fn test_count_by_category() {
        let mut report = ValidationReport::default();
        report.errors.push(ValidationError::system("a.txt", "x", "y"));
        report.errors.push(ValidationError::new(
            "b.txt",
            1,
            "sexo",
            "bad",
            "Res. 2275/2023",
            "use M or F",
            ErrorCategory::FieldFormat,
        ));
        assert_eq!(report.count_by_category(ErrorCategory::System), 1);
        assert_eq!(report.count_by_category(ErrorCategory::FieldFormat), 1);
        assert_eq!(report.count_by_category(ErrorCategory::Coherence), 0);
    }
}
