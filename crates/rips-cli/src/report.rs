//! Report serialization.
//!
//! The engine produces collections; this module renders them. The JSON
//! payload is versioned so downstream tooling can detect shape changes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use rips_model::{CorrectionRecord, RunStatistics, ValidationError, ValidationReport};

const REPORT_SCHEMA: &str = "rips-validator.validation-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

/// How many invalid CIE10 codes the summary lists.
const TOP_INVALID_CODES: usize = 10;

#[derive(Debug, Serialize)]
struct ReportPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    stats: &'a RunStatistics,
    errors: &'a [ValidationError],
    corrections: &'a [CorrectionRecord],
    most_common_invalid_cie10: Vec<InvalidCodeEntry>,
}

#[derive(Debug, Serialize)]
struct InvalidCodeEntry {
    code: String,
    count: usize,
}

/// Write `informe_errores.json` into the output directory.
pub fn write_report_json(
    output_dir: &Path,
    report: &ValidationReport,
    invalid_cie10_codes: &BTreeMap<String, usize>,
) -> Result<PathBuf> {
    let output_path = output_dir.join("informe_errores.json");
    let payload = ReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        stats: &report.stats,
        errors: &report.errors,
        corrections: &report.corrections,
        most_common_invalid_cie10: most_common(invalid_cie10_codes),
    };
    let json = serde_json::to_string_pretty(&payload).context("failed to serialize report")?;
    std::fs::write(&output_path, format!("{json}\n"))
        .with_context(|| format!("failed to write report {}", output_path.display()))?;
    Ok(output_path)
}

/// Write corrected files to `<output>/archivosCorregidos/<stem>_corregido.txt`.
pub fn write_corrected_files(
    output_dir: &Path,
    corrected_files: &BTreeMap<String, Vec<String>>,
) -> Result<Vec<PathBuf>> {
    if corrected_files.is_empty() {
        return Ok(Vec::new());
    }

    let corrected_dir = output_dir.join("archivosCorregidos");
    std::fs::create_dir_all(&corrected_dir).with_context(|| {
        format!(
            "failed to create corrected-files directory {}",
            corrected_dir.display()
        )
    })?;

    let mut written = Vec::new();
    for (name, lines) in corrected_files {
        let stem = name.strip_suffix(".txt").unwrap_or(name);
        let path = corrected_dir.join(format!("{stem}_corregido.txt"));
        let mut content = lines.join("\n");
        content.push('\n');
        std::fs::write(&path, content)
            .with_context(|| format!("failed to write corrected file {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

/// Invalid codes sorted by descending count, then code, capped.
fn most_common(invalid_cie10_codes: &BTreeMap<String, usize>) -> Vec<InvalidCodeEntry> {
    let mut entries: Vec<(&String, &usize)> = invalid_cie10_codes.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    entries
        .into_iter()
        .take(TOP_INVALID_CODES)
        .map(|(code, count)| InvalidCodeEntry {
            code: code.clone(),
            count: *count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_payload_written() {
        let dir = tempfile::TempDir::new().unwrap();
        let report = ValidationReport::default();
        let mut tally = BTreeMap::new();
        tally.insert("XX1".to_string(), 3usize);

        let path = write_report_json(dir.path(), &report, &tally).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains(REPORT_SCHEMA));
        assert!(content.contains("\"XX1\""));
    }

    #[test]
    fn test_corrected_files_naming() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut corrected = BTreeMap::new();
        corrected.insert("AC0001.txt".to_string(), vec!["a,b".to_string()]);

        let written = write_corrected_files(dir.path(), &corrected).unwrap();
        assert_eq!(written.len(), 1);
        assert!(written[0].ends_with("archivosCorregidos/AC0001_corregido.txt"));
        assert_eq!(std::fs::read_to_string(&written[0]).unwrap(), "a,b\n");
    }
}
