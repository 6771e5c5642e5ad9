//! Validation pipeline with explicit stages.
//!
//! 1. **Ingest**: discover and read input files (flat directory or
//!    consolidated JSON). Unreadable or unrecognized files become one
//!    file-scoped system error each; the run continues.
//! 2. **Validate**: hand the loaded files to the engine (reference load,
//!    per-record validation, duplicate detection).
//! 3. **Output**: write the JSON report and, in auto-correct mode, the
//!    corrected files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use rips_catalog::Cie10Catalog;
use rips_ingest::{SourceFile, list_rips_files, read_consolidated_json, read_source_file};
use rips_model::{RunOptions, ValidationError};
use rips_validate::ValidationEngine;

use crate::report::{write_corrected_files, write_report_json};
use crate::types::RunResult;

/// Loaded input plus the system errors produced while loading it.
struct IngestOutcome {
    files: Vec<SourceFile>,
    system_errors: Vec<ValidationError>,
}

/// Run the full pipeline over a directory or consolidated JSON document.
pub fn run_pipeline(
    input: &Path,
    output_dir: &Path,
    catalog: &Cie10Catalog,
    options: RunOptions,
) -> Result<RunResult> {
    let ingest = ingest_stage(input, options)?;
    info!(files = ingest.files.len(), "input loaded");

    let engine = ValidationEngine::new(catalog, options);
    let mut output = engine.run(&ingest.files);

    // File-scoped system errors lead the report, before record findings.
    if !ingest.system_errors.is_empty() {
        let mut errors = ingest.system_errors;
        errors.append(&mut output.report.errors);
        output.report.errors = errors;
    }

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;
    let report_path = write_report_json(output_dir, &output.report, &output.invalid_cie10_codes)?;
    let corrected_paths = write_corrected_files(output_dir, &output.corrected_files)?;

    Ok(RunResult {
        report: output.report,
        invalid_cie10_codes: output.invalid_cie10_codes,
        report_path,
        corrected_paths,
    })
}

/// Load the input set. Only a missing/unreadable input *directory* is fatal;
/// per-file failures degrade to system errors.
fn ingest_stage(input: &Path, options: RunOptions) -> Result<IngestOutcome> {
    let mut files = Vec::new();
    let mut system_errors = Vec::new();

    let is_json = input
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        match read_consolidated_json(input, options.reference_date) {
            Ok(flattened) => files.extend(flattened),
            Err(error) => {
                warn!(file = %input.display(), %error, "failed to load JSON document");
                system_errors.push(ValidationError::system(
                    file_label(input),
                    format!("Error al leer el documento JSON: {error}"),
                    "Verificar que el documento sea JSON válido con el arreglo 'usuarios'",
                ));
            }
        }
        return Ok(IngestOutcome {
            files,
            system_errors,
        });
    }

    let paths = list_rips_files(input)
        .with_context(|| format!("failed to list input directory {}", input.display()))?;
    if paths.is_empty() {
        warn!(dir = %input.display(), "no .txt files found in input directory");
    }

    for path in paths {
        match read_source_file(&path) {
            Ok(file) => files.push(file),
            Err(error) => {
                warn!(file = %path.display(), %error, "skipping file");
                system_errors.push(ValidationError::system(
                    file_label(&path),
                    format!("Error al leer el archivo: {error}"),
                    "El nombre debe seguir el formato AF######.txt, US######.txt, etc. \
                     y el archivo debe ser legible",
                ));
            }
        }
    }

    Ok(IngestOutcome {
        files,
        system_errors,
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .and_then(|v| v.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Build the catalog, optionally extended from a CSV file.
pub fn build_catalog(cie10_csv: Option<&PathBuf>) -> Result<Cie10Catalog> {
    let mut catalog = Cie10Catalog::with_default_codes();
    if let Some(path) = cie10_csv {
        let loaded = catalog
            .extend_from_csv(path)
            .with_context(|| format!("failed to load CIE10 catalog {}", path.display()))?;
        info!(codes = loaded, file = %path.display(), "CIE10 catalog extended");
    }
    Ok(catalog)
}
