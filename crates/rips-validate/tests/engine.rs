//! End-to-end engine tests over small in-memory file sets.

use chrono::NaiveDate;

use rips_catalog::Cie10Catalog;
use rips_ingest::{RawRow, SourceFile};
use rips_model::{ErrorCategory, FileKind, RunMode, RunOptions};
use rips_validate::ValidationEngine;

fn row(line_number: usize, line: &str) -> RawRow {
    RawRow {
        line_number,
        fields: line.split(',').map(str::to_string).collect(),
    }
}

fn af_file() -> SourceFile {
    SourceFile {
        name: "AF0001.txt".into(),
        kind: FileKind::Af,
        rows: vec![row(
            1,
            "123456789012,IPS EJEMPLO,NI,900123456,F001,01/03/2023,01/03/2023,31/03/2023,\
             EPS001,EPS EJEMPLO,C-001,POS,,0,0,0,100000",
        )],
    }
}

fn us_file() -> SourceFile {
    SourceFile {
        name: "US0001.txt".into(),
        kind: FileKind::Us,
        rows: vec![row(1, "CC,123,EPS001,1,GOMEZ,PEREZ,ANA,MARIA,30,1,F,11,001,U,")],
    }
}

fn ac_line(invoice: &str, sexo: &str, diagnosis: &str) -> String {
    format!(
        "{invoice},123456789012,CC,123,15/03/2023,,890201,,,40,13,{diagnosis},,,,1,\
         35000,0,35000,30,1,{sexo}"
    )
}

fn ac_file(name: &str, lines: &[String]) -> SourceFile {
    SourceFile {
        name: name.into(),
        kind: FileKind::Ac,
        rows: lines
            .iter()
            .enumerate()
            .map(|(index, line)| row(index + 1, line))
            .collect(),
    }
}

fn options(mode: RunMode) -> RunOptions {
    RunOptions::new(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(), mode)
}

#[test]
fn clean_run_yields_zero_errors() {
    let catalog = Cie10Catalog::with_default_codes();
    let engine = ValidationEngine::new(&catalog, options(RunMode::ValidateOnly));
    let files = vec![
        af_file(),
        us_file(),
        ac_file("AC0001.txt", &[ac_line("F001", "F", "A009")]),
    ];

    let output = engine.run(&files);
    assert!(
        output.report.errors.is_empty(),
        "unexpected errors: {:#?}",
        output.report.errors
    );
    assert_eq!(output.report.stats.files_processed, 3);
    assert_eq!(output.report.stats.records_processed, 3);
    assert_eq!(output.report.stats.valid_records, 3);
    assert_eq!(output.report.stats.invalid_records, 0);
}

#[test]
fn unknown_invoice_yields_one_referential_error() {
    let catalog = Cie10Catalog::with_default_codes();
    let engine = ValidationEngine::new(&catalog, options(RunMode::ValidateOnly));
    let files = vec![
        af_file(),
        us_file(),
        ac_file("AC0001.txt", &[ac_line("F999", "F", "A009")]),
    ];

    let output = engine.run(&files);
    assert_eq!(output.report.errors.len(), 1);
    let error = &output.report.errors[0];
    assert_eq!(error.field_name, "num_factura");
    assert_eq!(error.category, ErrorCategory::Referential);
    assert!(error.description.contains("F999"));
}

#[test]
fn unknown_invoice_and_patient_yield_two_independent_errors() {
    let catalog = Cie10Catalog::with_default_codes();
    let engine = ValidationEngine::new(&catalog, options(RunMode::ValidateOnly));
    let stray = "F999,123456789012,TI,999,15/03/2023,,890201,,,40,13,A009,,,,1,\
                 35000,0,35000,30,1,F"
        .to_string();
    let files = vec![af_file(), us_file(), ac_file("AC0001.txt", &[stray])];

    let output = engine.run(&files);
    assert_eq!(output.report.errors.len(), 2);
    assert_eq!(output.report.errors[0].field_name, "num_factura");
    assert_eq!(
        output.report.errors[1].field_name,
        "tipo_documento/num_documento"
    );
    assert!(
        output
            .report
            .errors
            .iter()
            .all(|e| e.category == ErrorCategory::Referential)
    );
}

#[test]
fn male_patient_with_obstetric_diagnosis_is_one_coherence_error() {
    let catalog = Cie10Catalog::with_default_codes();
    let engine = ValidationEngine::new(&catalog, options(RunMode::ValidateOnly));
    let files = vec![
        af_file(),
        us_file(),
        ac_file("AC0001.txt", &[ac_line("F001", "M", "O23X")]),
    ];

    let output = engine.run(&files);
    assert_eq!(output.report.errors.len(), 1);
    let error = &output.report.errors[0];
    assert_eq!(error.field_name, "sexo/diagnostico");
    assert_eq!(error.category, ErrorCategory::Coherence);
    assert_eq!(output.report.stats.coherence_issues, 1);
}

#[test]
fn three_identical_consultations_yield_two_duplicate_attentions() {
    let catalog = Cie10Catalog::with_default_codes();
    let engine = ValidationEngine::new(&catalog, options(RunMode::ValidateOnly));
    let line = ac_line("F001", "F", "A009");
    let files = vec![
        af_file(),
        us_file(),
        ac_file("AC0001.txt", &[line.clone(), line.clone(), line]),
    ];

    let output = engine.run(&files);
    let duplicates: Vec<_> = output
        .report
        .errors
        .iter()
        .filter(|e| e.field_name == "duplicado_atencion")
        .collect();
    assert_eq!(duplicates.len(), 2);
    assert_eq!(output.report.stats.duplicate_attentions, 2);
}

#[test]
fn duplicate_attention_across_files_cites_both_files() {
    let catalog = Cie10Catalog::with_default_codes();
    let engine = ValidationEngine::new(&catalog, options(RunMode::ValidateOnly));
    let line = ac_line("F001", "F", "A009");
    let files = vec![
        af_file(),
        us_file(),
        ac_file("AC0001.txt", &[line.clone()]),
        ac_file("AC0002.txt", &[line]),
    ];

    let output = engine.run(&files);
    assert_eq!(output.report.errors.len(), 1);
    let error = &output.report.errors[0];
    assert_eq!(error.source_file, "AC0002.txt");
    assert!(error.description.contains("AC0001.txt"));
    assert_eq!(error.category, ErrorCategory::Integrity);
}

#[test]
fn structural_error_is_fatal_only_for_that_line() {
    let catalog = Cie10Catalog::with_default_codes();
    let engine = ValidationEngine::new(&catalog, options(RunMode::ValidateOnly));
    let files = vec![
        af_file(),
        us_file(),
        ac_file(
            "AC0001.txt",
            &["solo,tres,campos".to_string(), ac_line("F001", "F", "A009")],
        ),
    ];

    let output = engine.run(&files);
    assert_eq!(output.report.errors.len(), 1);
    assert_eq!(output.report.errors[0].category, ErrorCategory::Structural);
    assert_eq!(output.report.errors[0].record_index, 1);
    // The well-formed second line was still processed and passed.
    assert_eq!(output.report.stats.valid_records, 3);
    assert_eq!(output.report.stats.invalid_records, 1);
}

#[test]
fn auto_apply_substitutes_only_high_confidence() {
    let catalog = Cie10Catalog::with_default_codes();
    let engine = ValidationEngine::new(&catalog, options(RunMode::AutoCorrect));
    // ISO date (high-confidence fix) and a four-digit CUPS (medium).
    let dirty = "F001,123456789012,CC,123,2023-03-15,,8902,,,40,13,A009,,,,1,\
                 35000,0,35000,30,1,F"
        .to_string();
    let files = vec![af_file(), us_file(), ac_file("AC0001.txt", &[dirty])];

    let output = engine.run(&files);

    // Both corrections are recorded.
    let kinds: Vec<_> = output
        .report
        .corrections
        .iter()
        .map(|c| (c.field_name.clone(), c.confidence))
        .collect();
    assert!(kinds.iter().any(|(f, _)| f == "fecha_consulta"));
    assert!(kinds.iter().any(|(f, _)| f == "cod_consulta"));

    // Only the high-confidence date fix reached the output line.
    let lines = output.corrected_files.get("AC0001.txt").unwrap();
    assert!(lines[0].contains("15/03/2023"));
    assert!(lines[0].contains(",8902,"));
    assert_eq!(output.report.stats.corrections_applied, 1);

    // Validation saw the corrected date, so only the CUPS error remains.
    assert_eq!(output.report.errors.len(), 1);
    assert_eq!(output.report.errors[0].field_name, "cod_consulta");
}

#[test]
fn suggest_mode_records_but_never_touches_data() {
    let catalog = Cie10Catalog::with_default_codes();
    let engine = ValidationEngine::new(&catalog, options(RunMode::SuggestCorrections));
    let dirty = "F001,123456789012,CC,123,2023-03-15,,890201,,,40,13,A009,,,,1,\
                 35000,0,35000,30,1,F"
        .to_string();
    let files = vec![af_file(), us_file(), ac_file("AC0001.txt", &[dirty])];

    let output = engine.run(&files);
    assert!(!output.report.corrections.is_empty());
    assert!(output.corrected_files.is_empty());
    assert_eq!(output.report.stats.corrections_applied, 0);
    // The uncorrected date is still reported as a format error.
    assert!(
        output
            .report
            .errors
            .iter()
            .any(|e| e.field_name == "fecha_consulta")
    );
}

#[test]
fn document_type_synonyms_bucket_together_when_corrector_enabled() {
    let catalog = Cie10Catalog::with_default_codes();
    let engine = ValidationEngine::new(&catalog, options(RunMode::SuggestCorrections));
    let canonical = ac_line("F001", "F", "A009");
    let synonym = canonical.replacen(",CC,", ",C.C,", 1);
    let files = vec![
        af_file(),
        us_file(),
        ac_file("AC0001.txt", &[canonical]),
        ac_file("AC0002.txt", &[synonym]),
    ];

    let output = engine.run(&files);
    assert_eq!(output.report.stats.duplicate_attentions, 1);
}

#[test]
fn cie10_catalog_misses_are_tallied() {
    let catalog = Cie10Catalog::with_default_codes();
    let engine = ValidationEngine::new(&catalog, options(RunMode::ValidateOnly));
    // '0A9' has no valid chapter letter; appears twice.
    let bad = ac_line("F001", "F", "0A9");
    let files = vec![
        af_file(),
        us_file(),
        ac_file("AC0001.txt", &[bad.clone(), bad]),
    ];

    let output = engine.run(&files);
    assert_eq!(output.report.stats.cie10_invalid, 2);
    assert_eq!(output.invalid_cie10_codes.get("0A9"), Some(&2));
}
