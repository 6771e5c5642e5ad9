//! The three-phase validation engine.
//!
//! Phase 1 loads AF/US references, phase 2 validates every record (field
//! rules, catalog, coherence, references) while accumulating attention
//! entries, phase 3 reports duplicates. The engine imposes this order
//! itself, so input files may arrive in any order. All buffers are
//! append-only and merged in input order; given the same input the report
//! is byte-for-byte reproducible.

use std::collections::BTreeMap;

use tracing::{debug, info};

use rips_catalog::{Cie10Catalog, canonical_document_type};
use rips_correct::AutoCorrector;
use rips_ingest::{SourceFile, parse_record};
use rips_model::{
    ErrorCategory, FileKind, FileRecord, RunOptions, ValidationError, ValidationReport,
};

use crate::cie10_check::validate_cie10_codes;
use crate::coherence::validate_record_coherence;
use crate::cross_file::{
    AttentionEntry, AttentionKey, AttentionKind, AttentionLog, ReferenceIndex, validate_references,
};
use crate::rules::validate_record;

/// Everything one run produces.
#[derive(Debug, Default)]
pub struct EngineOutput {
    pub report: ValidationReport,
    /// Corrected output lines per file, present only in auto-correct mode
    /// and only for files that had at least one correction applied.
    pub corrected_files: BTreeMap<String, Vec<String>>,
    /// Invalid CIE10 codes with occurrence counts, for the
    /// most-common-invalid summary.
    pub invalid_cie10_codes: BTreeMap<String, usize>,
}

/// The validation engine. Holds only injected, immutable collaborators;
/// each [`run`](Self::run) is independent and no state survives it.
#[derive(Debug, Clone, Copy)]
pub struct ValidationEngine<'a> {
    catalog: &'a Cie10Catalog,
    options: RunOptions,
}

impl<'a> ValidationEngine<'a> {
    pub fn new(catalog: &'a Cie10Catalog, options: RunOptions) -> Self {
        Self { catalog, options }
    }

    /// Validate a set of loaded files and aggregate the report.
    pub fn run(&self, files: &[SourceFile]) -> EngineOutput {
        let mut output = EngineOutput::default();

        // Phase 1: reference load. Rows that fail to parse are skipped here;
        // phase 2 reports them.
        let mut index = ReferenceIndex::new();
        for file in files {
            if !matches!(file.kind, FileKind::Af | FileKind::Us) {
                continue;
            }
            for row in &file.rows {
                if let Ok(record) = parse_record(file.kind, &row.fields) {
                    index.register(&record);
                }
            }
        }
        info!(
            invoices = index.invoice_count(),
            patients = index.patient_count(),
            "reference index built"
        );

        // Phase 2: per-record validation in input order.
        let corrector = AutoCorrector::new(self.catalog);
        let mut attention_log = AttentionLog::new();
        for file in files {
            let file_errors = self.validate_file(
                file,
                &index,
                &corrector,
                &mut attention_log,
                &mut output,
            );
            debug!(file = %file.name, errors = file_errors, "file validated");
        }

        // Phase 3: duplicates, after every record has been seen.
        let invoice_patient_duplicates = index.duplicate_errors();
        let attention_duplicates = attention_log.detect_duplicates();
        output.report.stats.duplicate_attentions = attention_duplicates.len();
        output.report.errors.extend(invoice_patient_duplicates);
        output.report.errors.extend(attention_duplicates);

        info!(
            files = output.report.stats.files_processed,
            records = output.report.stats.records_processed,
            errors = output.report.errors.len(),
            corrections = output.report.corrections.len(),
            "validation run complete"
        );
        output
    }

    /// Phase-2 work for one file. Returns the number of errors found.
    fn validate_file(
        &self,
        file: &SourceFile,
        index: &ReferenceIndex,
        corrector: &AutoCorrector,
        attention_log: &mut AttentionLog,
        output: &mut EngineOutput,
    ) -> usize {
        output.report.stats.record_file(file.kind.code());

        let mut errors = Vec::new();
        let mut corrected_lines = Vec::new();
        let mut applied_in_file = 0usize;

        for row in &file.rows {
            output.report.stats.records_processed += 1;

            let expected = file.kind.field_count();
            if row.fields.len() != expected {
                errors.push(ValidationError::new(
                    file.name.clone(),
                    row.line_number,
                    "estructura_archivo",
                    format!(
                        "Línea {}: Se esperaban {expected} campos, se encontraron {}",
                        row.line_number,
                        row.fields.len()
                    ),
                    "Res. 2275/2023",
                    "Verificar estructura del archivo y delimitadores",
                    ErrorCategory::Structural,
                ));
                output.report.stats.invalid_records += 1;
                if self.options.mode.applies_corrections() {
                    corrected_lines.push(row.fields.join(","));
                }
                continue;
            }

            // Corrections run before validation; only High confidence
            // proposals are ever substituted, and only in auto mode.
            let mut effective = row.fields.clone();
            if self.options.mode.corrections_enabled() {
                for proposal in
                    corrector.correct_row(file.kind, &row.fields, &file.name, row.line_number)
                {
                    if self.options.mode.applies_corrections()
                        && proposal.record.confidence.is_auto_applicable()
                    {
                        effective[proposal.field_index] = proposal.record.corrected_value.clone();
                        applied_in_file += 1;
                    }
                    output.report.corrections.push(proposal.record);
                }
            }

            let Ok(record) = parse_record(file.kind, &effective) else {
                continue;
            };

            let mut row_errors = validate_record(
                &record,
                &file.name,
                row.line_number,
                self.options.reference_date,
            );

            let (cie10_errors, invalid_codes) =
                validate_cie10_codes(&record, self.catalog, &file.name, row.line_number);
            output.report.stats.cie10_invalid += cie10_errors.len();
            for code in invalid_codes {
                *output.invalid_cie10_codes.entry(code).or_default() += 1;
            }
            row_errors.extend(cie10_errors);

            let coherence_errors =
                validate_record_coherence(&record, &file.name, row.line_number);
            output.report.stats.coherence_issues += coherence_errors.len();
            row_errors.extend(coherence_errors);

            row_errors.extend(validate_references(
                &record,
                index,
                &file.name,
                row.line_number,
            ));

            self.register_attention(&record, &file.name, row.line_number, attention_log);

            if row_errors.is_empty() {
                output.report.stats.valid_records += 1;
            } else {
                output.report.stats.invalid_records += 1;
            }
            errors.extend(row_errors);

            if self.options.mode.applies_corrections() {
                corrected_lines.push(effective.join(","));
            }
        }

        output.report.stats.corrections_applied += applied_in_file;
        if self.options.mode.applies_corrections() && applied_in_file > 0 {
            output
                .corrected_files
                .insert(file.name.clone(), corrected_lines);
        }

        let count = errors.len();
        output.report.errors.extend(errors);
        count
    }

    /// Accumulate an attention entry for AC/AP/AT records. The key uses the
    /// canonical document type whenever the corrector is enabled, so `C.C`
    /// and `CC` fall into the same bucket.
    fn register_attention(
        &self,
        record: &FileRecord,
        file_name: &str,
        line_number: usize,
        attention_log: &mut AttentionLog,
    ) {
        let (tipo_doc, num_doc, fecha, kind, code) = match record {
            FileRecord::Ac(ac) => (
                ac.tipo_documento.as_str(),
                ac.num_documento.as_str(),
                ac.fecha_consulta.as_str(),
                AttentionKind::Consultation,
                ac.cod_consulta.as_str(),
            ),
            FileRecord::Ap(ap) => (
                ap.tipo_documento.as_str(),
                ap.num_documento.as_str(),
                ap.fecha_procedimiento.as_str(),
                AttentionKind::Procedure,
                ap.cod_procedimiento.as_str(),
            ),
            // AT has no service date of its own; group by patient only.
            FileRecord::At(at) => (
                at.tipo_documento.as_str(),
                at.num_documento.as_str(),
                "",
                AttentionKind::Service,
                at.cod_servicio.as_str(),
            ),
            _ => return,
        };

        let document_type = if self.options.mode.corrections_enabled() {
            canonical_document_type(tipo_doc)
                .unwrap_or(tipo_doc)
                .to_string()
        } else {
            tipo_doc.to_string()
        };

        attention_log.register(
            AttentionKey {
                document_type,
                document_number: num_doc.to_string(),
                service_date: fecha.to_string(),
            },
            AttentionEntry {
                kind,
                code: code.to_string(),
                source_file: file_name.to_string(),
                record_index: line_number,
            },
        );
    }
}
