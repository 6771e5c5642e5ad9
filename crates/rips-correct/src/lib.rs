//! Auto-correction rules for RIPS fields.
//!
//! Every rule is a pure function from a raw value to an optional
//! [`CorrectionRecord`]; the record carries the corrected value, the
//! confidence level, and the rationale. Rules never mutate anything:
//! whether a correction is substituted into output data is the engine's
//! decision, and only `High` confidence corrections ever are.

mod rules;

pub use rules::{
    correct_cups_format, correct_date_format, correct_document_type, correct_numeric_format,
    normalize_text, suggest_cie10,
};

use rips_catalog::Cie10Catalog;
use rips_model::{CorrectionRecord, FileKind};

/// A correction proposal anchored to its field position in the row.
#[derive(Debug, Clone)]
pub struct FieldCorrection {
    pub field_index: usize,
    pub record: CorrectionRecord,
}

/// Applies the correction rules relevant to each file kind.
///
/// Field targeting mirrors the positional layout: US gets document type,
/// name normalization and age cleanup; AC and AP get document type, service
/// date, CUPS code, diagnosis suggestion and monetary values. Other kinds
/// pass through untouched.
#[derive(Debug, Clone, Copy)]
pub struct AutoCorrector<'a> {
    catalog: &'a Cie10Catalog,
}

impl<'a> AutoCorrector<'a> {
    pub fn new(catalog: &'a Cie10Catalog) -> Self {
        Self { catalog }
    }

    /// Run every applicable rule over a raw row. Returns one proposal per
    /// field that a rule wants to change, in field order.
    pub fn correct_row(
        &self,
        kind: FileKind,
        fields: &[String],
        file_name: &str,
        line_number: usize,
    ) -> Vec<FieldCorrection> {
        let mut corrections = Vec::new();
        let mut propose = |index: usize, record: Option<CorrectionRecord>| {
            if let Some(record) = record {
                corrections.push(FieldCorrection {
                    field_index: index,
                    record,
                });
            }
        };
        let field = |index: usize| fields.get(index).map(String::as_str).unwrap_or("");

        match kind {
            FileKind::Us => {
                propose(
                    0,
                    correct_document_type(field(0), "tipo_documento", file_name, line_number),
                );
                for (index, name) in [
                    (4, "primer_apellido"),
                    (5, "segundo_apellido"),
                    (6, "primer_nombre"),
                    (7, "segundo_nombre"),
                ] {
                    propose(
                        index,
                        normalize_text(field(index), name, file_name, line_number, true),
                    );
                }
                propose(
                    8,
                    correct_numeric_format(field(8), "edad", file_name, line_number, false),
                );
            }
            FileKind::Ac => {
                propose(
                    2,
                    correct_document_type(field(2), "tipo_documento", file_name, line_number),
                );
                propose(
                    4,
                    correct_date_format(field(4), "fecha_consulta", file_name, line_number),
                );
                propose(
                    6,
                    correct_cups_format(field(6), "cod_consulta", file_name, line_number),
                );
                propose(
                    11,
                    suggest_cie10(
                        field(11),
                        "diagnostico_principal",
                        file_name,
                        line_number,
                        self.catalog,
                    ),
                );
                for (index, name) in [
                    (16, "valor_consulta"),
                    (17, "valor_cuota_moderadora"),
                    (18, "valor_neto"),
                ] {
                    propose(
                        index,
                        correct_numeric_format(field(index), name, file_name, line_number, true),
                    );
                }
            }
            FileKind::Ap => {
                propose(
                    2,
                    correct_document_type(field(2), "tipo_documento", file_name, line_number),
                );
                propose(
                    4,
                    correct_date_format(field(4), "fecha_procedimiento", file_name, line_number),
                );
                propose(
                    6,
                    correct_cups_format(field(6), "cod_procedimiento", file_name, line_number),
                );
                propose(
                    12,
                    suggest_cie10(
                        field(12),
                        "diagnostico_principal",
                        file_name,
                        line_number,
                        self.catalog,
                    ),
                );
                for (index, name) in [
                    (16, "valor_procedimiento"),
                    (17, "valor_cuota_moderadora"),
                    (18, "valor_neto"),
                ] {
                    propose(
                        index,
                        correct_numeric_format(field(index), name, file_name, line_number, true),
                    );
                }
            }
            _ => {}
        }

        corrections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rips_model::Confidence;

    fn ac_fields() -> Vec<String> {
        let mut fields = vec![String::new(); FileKind::Ac.field_count()];
        fields[2] = "C.C".into();
        fields[4] = "2023-03-15".into();
        fields[6] = "8902".into();
        fields[11] = "A009".into();
        fields[16] = "35.000,50".into();
        fields
    }

    #[test]
    fn test_correct_row_targets_ac_fields() {
        let catalog = Cie10Catalog::with_default_codes();
        let corrector = AutoCorrector::new(&catalog);
        let corrections = corrector.correct_row(FileKind::Ac, &ac_fields(), "AC0001.txt", 2);

        let indices: Vec<usize> = corrections.iter().map(|c| c.field_index).collect();
        assert!(indices.contains(&2), "document type");
        assert!(indices.contains(&4), "date");
        assert!(indices.contains(&6), "CUPS");
        assert!(indices.contains(&16), "monetary value");
        // A009 is valid, so no diagnosis suggestion.
        assert!(!indices.contains(&11));
    }

    #[test]
    fn test_cups_padding_is_medium_confidence() {
        let catalog = Cie10Catalog::with_default_codes();
        let corrector = AutoCorrector::new(&catalog);
        let corrections = corrector.correct_row(FileKind::Ac, &ac_fields(), "AC0001.txt", 2);
        let cups = corrections.iter().find(|c| c.field_index == 6).unwrap();
        assert_eq!(cups.record.confidence, Confidence::Medium);
        assert_eq!(cups.record.corrected_value, "890200");
    }

    #[test]
    fn test_other_kinds_pass_through() {
        let catalog = Cie10Catalog::with_default_codes();
        let corrector = AutoCorrector::new(&catalog);
        let fields = vec!["x".to_string(); FileKind::Ct.field_count()];
        assert!(
            corrector
                .correct_row(FileKind::Ct, &fields, "CT0001.txt", 1)
                .is_empty()
        );
    }
}
