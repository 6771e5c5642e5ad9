//! CIE10 catalog validation over the diagnosis fields of a record.
//!
//! The format check in [`crate::rules`] decides whether a code *looks* like
//! CIE10; this module asks the injected catalog whether the code *exists*,
//! with the catalog's lenient chapter fallback and prefix suggestions.

use rips_catalog::Cie10Catalog;
use rips_model::{ErrorCategory, FileRecord, ValidationError};

const RULE: &str = "Res. 2275/2023 y 3280/2018 - Validación de calidad de datos";

/// Diagnosis fields carried by a record kind, with their field names.
fn diagnosis_fields(record: &FileRecord) -> Vec<(&str, &str)> {
    match record {
        FileRecord::Ac(ac) => vec![
            (ac.diagnostico_principal.as_str(), "diagnostico_principal"),
            (ac.diagnostico_relacionado1.as_str(), "diagnostico_relacionado1"),
            (ac.diagnostico_relacionado2.as_str(), "diagnostico_relacionado2"),
            (ac.diagnostico_relacionado3.as_str(), "diagnostico_relacionado3"),
        ],
        FileRecord::Ap(ap) => vec![
            (ap.diagnostico_principal.as_str(), "diagnostico_principal"),
            (ap.diagnostico_relacionado.as_str(), "diagnostico_relacionado"),
            (ap.complicacion.as_str(), "complicacion"),
        ],
        FileRecord::Ah(ah) => vec![
            (ah.diagnostico_ingreso.as_str(), "diagnostico_ingreso"),
            (ah.diagnostico_egreso.as_str(), "diagnostico_egreso"),
            (ah.diagnostico_relacionado1.as_str(), "diagnostico_relacionado1"),
            (ah.diagnostico_relacionado2.as_str(), "diagnostico_relacionado2"),
            (ah.diagnostico_relacionado3.as_str(), "diagnostico_relacionado3"),
            (ah.diagnostico_complicacion.as_str(), "diagnostico_complicacion"),
        ],
        FileRecord::An(an) => vec![(
            an.diagnostico_recien_nacido.as_str(),
            "diagnostico_recien_nacido",
        )],
        _ => Vec::new(),
    }
}

/// Check every diagnosis field of the record against the catalog.
///
/// Returns the errors plus the invalid codes seen, so the engine can keep
/// its most-common-invalid tally. Empty fields are skipped here; whether
/// they were allowed to be empty is the format rules' concern.
pub fn validate_cie10_codes(
    record: &FileRecord,
    catalog: &Cie10Catalog,
    file_name: &str,
    line_number: usize,
) -> (Vec<ValidationError>, Vec<String>) {
    let mut errors = Vec::new();
    let mut invalid_codes = Vec::new();

    for (value, field_name) in diagnosis_fields(record) {
        let code = value.trim();
        if code.is_empty() {
            continue;
        }

        let result = catalog.validate_with_suggestion(code);
        if result.is_valid {
            continue;
        }

        invalid_codes.push(code.to_string());
        let suggestion_text = if result.suggestions.is_empty() {
            String::new()
        } else {
            format!(
                " Códigos similares válidos: {}",
                result.suggestions[..result.suggestions.len().min(3)].join(", ")
            )
        };
        let fix = if result.suggestions.is_empty() {
            "Verificar el código en el catálogo CIE10 vigente. Consultar con el área médica."
                .to_string()
        } else {
            format!("Verificar el código en el catálogo CIE10 vigente.{suggestion_text}")
        };
        errors.push(ValidationError::new(
            file_name,
            line_number,
            field_name,
            format!(
                "El código CIE10 '{code}' no se encuentra en el catálogo vigente. {}.{suggestion_text}",
                result.message
            ),
            RULE,
            fix,
            ErrorCategory::FieldFormat,
        ));
    }

    (errors, invalid_codes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rips_model::AhRecord;

    fn ah_with(ingreso: &str, egreso: &str) -> FileRecord {
        FileRecord::Ah(AhRecord {
            num_factura: "F001".into(),
            cod_prestador: "123456789012".into(),
            tipo_documento: "CC".into(),
            num_documento: "123".into(),
            via_ingreso: "1".into(),
            fecha_ingreso: "01/03/2023".into(),
            hora_ingreso: String::new(),
            num_autorizacion: String::new(),
            causa_externa: "13".into(),
            diagnostico_ingreso: ingreso.into(),
            diagnostico_egreso: egreso.into(),
            diagnostico_relacionado1: String::new(),
            diagnostico_relacionado2: String::new(),
            diagnostico_relacionado3: String::new(),
            diagnostico_complicacion: String::new(),
            estado_salida: "1".into(),
            diagnostico_muerte: String::new(),
            fecha_egreso: "05/03/2023".into(),
            hora_egreso: String::new(),
            valor_hospitalizacion: "500000".into(),
            valor_cuota_moderadora: "0".into(),
            valor_neto: "500000".into(),
        })
    }

    #[test]
    fn test_valid_codes_pass() {
        let catalog = Cie10Catalog::with_default_codes();
        let (errors, invalid) =
            validate_cie10_codes(&ah_with("A009", "J189"), &catalog, "AH0001.txt", 1);
        assert!(errors.is_empty());
        assert!(invalid.is_empty());
    }

    #[test]
    fn test_unknown_chapter_code_is_reported_with_field_name() {
        let catalog = Cie10Catalog::with_default_codes();
        let (errors, invalid) =
            validate_cie10_codes(&ah_with("0A9", "A009"), &catalog, "AH0001.txt", 7);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field_name, "diagnostico_ingreso");
        assert_eq!(errors[0].record_index, 7);
        assert_eq!(invalid, vec!["0A9".to_string()]);
    }
}
