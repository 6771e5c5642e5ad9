//! Result types shared by the CLI commands.

use std::collections::BTreeMap;
use std::path::PathBuf;

use rips_model::ValidationReport;

/// Outcome of one `validate` invocation.
#[derive(Debug)]
pub struct RunResult {
    /// The aggregated engine report (system errors included).
    pub report: ValidationReport,
    /// Invalid CIE10 codes with occurrence counts.
    pub invalid_cie10_codes: BTreeMap<String, usize>,
    /// Where the JSON report was written.
    pub report_path: PathBuf,
    /// Corrected files written in auto-correct mode.
    pub corrected_paths: Vec<PathBuf>,
}

impl RunResult {
    pub fn has_errors(&self) -> bool {
        self.report.has_errors()
    }
}
