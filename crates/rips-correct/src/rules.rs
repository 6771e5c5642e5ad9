//! The individual correction rules.

use std::sync::LazyLock;

use regex::Regex;

use rips_catalog::{Cie10Catalog, canonical_document_type};
use rips_model::{Confidence, CorrectionKind, CorrectionRecord};

/// YYYY-MM-DD or YYYY/MM/DD.
static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})[-/](\d{2})[-/](\d{2})$").expect("valid date pattern"));

/// DD-MM-YYYY.
static DASHED_DMY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})-(\d{2})-(\d{4})$").expect("valid date pattern"));

static MULTI_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

static NON_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\d.\-]").expect("valid pattern"));

static NON_INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\d\-]").expect("valid pattern"));

static NON_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\d]").expect("valid pattern"));

/// Rewrite YYYY-MM-DD, YYYY/MM/DD or DD-MM-YYYY into canonical DD/MM/YYYY.
/// Idempotent: canonical dates match neither pattern.
pub fn correct_date_format(
    value: &str,
    field_name: &str,
    file_name: &str,
    line_number: usize,
) -> Option<CorrectionRecord> {
    if value.trim().is_empty() {
        return None;
    }

    let corrected = if let Some(captures) = ISO_DATE.captures(value) {
        format!("{}/{}/{}", &captures[3], &captures[2], &captures[1])
    } else if let Some(captures) = DASHED_DMY.captures(value) {
        format!("{}/{}/{}", &captures[1], &captures[2], &captures[3])
    } else {
        return None;
    };

    if corrected == value {
        return None;
    }
    Some(CorrectionRecord::new(
        file_name,
        line_number,
        field_name,
        value,
        corrected.clone(),
        CorrectionKind::DateFormat,
        Confidence::High,
        format!("Formato de fecha corregido de '{value}' a '{corrected}' (DD/MM/YYYY)"),
    ))
}

/// Trim, collapse runs of whitespace, and optionally uppercase (name-like
/// fields).
pub fn normalize_text(
    value: &str,
    field_name: &str,
    file_name: &str,
    line_number: usize,
    uppercase: bool,
) -> Option<CorrectionRecord> {
    if value.is_empty() {
        return None;
    }

    let mut corrected = MULTI_SPACE.replace_all(value.trim(), " ").into_owned();
    if uppercase {
        corrected = corrected.to_uppercase();
    }

    if corrected == value {
        return None;
    }
    Some(CorrectionRecord::new(
        file_name,
        line_number,
        field_name,
        value,
        corrected,
        CorrectionKind::TextNormalization,
        Confidence::High,
        "Texto normalizado: espacios eliminados y/o convertido a mayúsculas",
    ))
}

/// Strip spaces and stray characters, normalize the decimal separator, and
/// keep the change only when the result actually parses.
pub fn correct_numeric_format(
    value: &str,
    field_name: &str,
    file_name: &str,
    line_number: usize,
    is_decimal: bool,
) -> Option<CorrectionRecord> {
    if value.trim().is_empty() {
        return None;
    }

    let mut corrected = value.trim().replace(' ', "");
    if is_decimal && corrected.contains(',') {
        // Thousands dots plus decimal comma is the common hand-typed form.
        if corrected.contains('.') {
            corrected = corrected.replace('.', "");
        }
        corrected = corrected.replace(',', ".");
    }
    corrected = if is_decimal {
        NON_DECIMAL.replace_all(&corrected, "").into_owned()
    } else {
        NON_INTEGER.replace_all(&corrected, "").into_owned()
    };

    let parses = if is_decimal {
        corrected.parse::<f64>().is_ok()
    } else {
        corrected.parse::<i64>().is_ok()
    };
    if !parses || corrected == value {
        return None;
    }
    Some(CorrectionRecord::new(
        file_name,
        line_number,
        field_name,
        value,
        corrected,
        CorrectionKind::NumericFormat,
        Confidence::High,
        "Formato numérico corregido",
    ))
}

/// Canonicalize a document type through the synonym table.
pub fn correct_document_type(
    value: &str,
    field_name: &str,
    file_name: &str,
    line_number: usize,
) -> Option<CorrectionRecord> {
    if value.is_empty() {
        return None;
    }

    let normalized = value.trim().to_uppercase();
    let corrected = canonical_document_type(&normalized)?;
    if corrected == normalized {
        return None;
    }
    Some(CorrectionRecord::new(
        file_name,
        line_number,
        field_name,
        normalized.clone(),
        corrected,
        CorrectionKind::DocumentType,
        Confidence::High,
        format!("Tipo de documento estandarizado de '{normalized}' a '{corrected}'"),
    ))
}

/// Digit-filter a CUPS code and pad/truncate it to exactly six digits.
/// Changes semantics, so it is only ever a suggestion.
pub fn correct_cups_format(
    value: &str,
    field_name: &str,
    file_name: &str,
    line_number: usize,
) -> Option<CorrectionRecord> {
    if value.trim().is_empty() {
        return None;
    }

    let original = value.trim().to_string();
    let mut corrected = NON_DIGIT.replace_all(&original, "").into_owned();
    if corrected.is_empty() {
        return None;
    }
    if corrected.len() < 6 {
        corrected = format!("{corrected:0<6}");
    } else if corrected.len() > 6 {
        corrected.truncate(6);
    }

    if corrected == original {
        return None;
    }
    Some(CorrectionRecord::new(
        file_name,
        line_number,
        field_name,
        original,
        corrected,
        CorrectionKind::CupsFormat,
        Confidence::Medium,
        "Código CUPS ajustado a 6 dígitos. REQUIERE VALIDACIÓN.",
    ))
}

/// Replace an invalid CIE10 code with the catalog's first prefix
/// suggestion. Requires clinical validation, hence medium confidence.
pub fn suggest_cie10(
    value: &str,
    field_name: &str,
    file_name: &str,
    line_number: usize,
    catalog: &Cie10Catalog,
) -> Option<CorrectionRecord> {
    if value.trim().is_empty() {
        return None;
    }

    let original = value.trim().to_uppercase();
    let result = catalog.validate_with_suggestion(&original);
    if result.is_valid {
        return None;
    }
    let suggested = result.suggestions.first()?;
    Some(CorrectionRecord::new(
        file_name,
        line_number,
        field_name,
        original.clone(),
        suggested.as_str(),
        CorrectionKind::Cie10Suggestion,
        Confidence::Medium,
        format!(
            "Código CIE10 '{original}' no válido. Sugerencia basada en similitud: \
             '{suggested}'. REQUIERE VALIDACIÓN MÉDICA antes de aplicar."
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_date_formats_normalize() {
        let record = correct_date_format("2023-03-15", "f", "x.txt", 1).unwrap();
        assert_eq!(record.corrected_value, "15/03/2023");
        let record = correct_date_format("2023/03/15", "f", "x.txt", 1).unwrap();
        assert_eq!(record.corrected_value, "15/03/2023");
        let record = correct_date_format("15-03-2023", "f", "x.txt", 1).unwrap();
        assert_eq!(record.corrected_value, "15/03/2023");
    }

    #[test]
    fn test_canonical_date_untouched() {
        assert!(correct_date_format("15/03/2023", "f", "x.txt", 1).is_none());
        assert!(correct_date_format("", "f", "x.txt", 1).is_none());
        assert!(correct_date_format("marzo 15", "f", "x.txt", 1).is_none());
    }

    #[test]
    fn test_text_normalization() {
        let record = normalize_text("  maría   del mar ", "primer_nombre", "x.txt", 1, true).unwrap();
        assert_eq!(record.corrected_value, "MARÍA DEL MAR");
        assert_eq!(record.confidence, Confidence::High);
        assert!(normalize_text("ANA", "primer_nombre", "x.txt", 1, true).is_none());
    }

    #[test]
    fn test_numeric_normalization() {
        let record = correct_numeric_format("35.000,50", "valor", "x.txt", 1, true).unwrap();
        assert_eq!(record.corrected_value, "35000.50");
        let record = correct_numeric_format("$ 1200", "valor", "x.txt", 1, true).unwrap();
        assert_eq!(record.corrected_value, "1200");
        let record = correct_numeric_format(" 30 ", "edad", "x.txt", 1, false).unwrap();
        assert_eq!(record.corrected_value, "30");
        // Unsalvageable values are left alone.
        assert!(correct_numeric_format("sin dato", "valor", "x.txt", 1, true).is_none());
        assert!(correct_numeric_format("35000", "valor", "x.txt", 1, true).is_none());
    }

    #[test]
    fn test_document_type_canonicalization() {
        let record = correct_document_type("c.c.", "tipo_documento", "x.txt", 1).unwrap();
        assert_eq!(record.corrected_value, "CC");
        assert_eq!(record.confidence, Confidence::High);
        assert!(correct_document_type("CC", "tipo_documento", "x.txt", 1).is_none());
        assert!(correct_document_type("ZZ", "tipo_documento", "x.txt", 1).is_none());
    }

    #[test]
    fn test_cups_padding_and_truncation() {
        let record = correct_cups_format("8902", "cups", "x.txt", 1).unwrap();
        assert_eq!(record.corrected_value, "890200");
        let record = correct_cups_format("89020155", "cups", "x.txt", 1).unwrap();
        assert_eq!(record.corrected_value, "890201");
        let record = correct_cups_format("89-02-01", "cups", "x.txt", 1).unwrap();
        assert_eq!(record.corrected_value, "890201");
        assert!(correct_cups_format("890201", "cups", "x.txt", 1).is_none());
        assert!(correct_cups_format("---", "cups", "x.txt", 1).is_none());
    }

    #[test]
    fn test_cie10_suggestion_is_medium_and_flagged() {
        let catalog = Cie10Catalog::with_default_codes();
        let record = suggest_cie10("A00Z", "dx", "x.txt", 1, &catalog).unwrap();
        assert_eq!(record.confidence, Confidence::Medium);
        assert!(record.corrected_value.starts_with("A00"));
        assert!(record.rationale.contains("VALIDACIÓN MÉDICA"));
        assert!(suggest_cie10("A009", "dx", "x.txt", 1, &catalog).is_none());
    }

    proptest! {
        /// Any well-formed ISO date normalizes to DD/MM/YYYY, and the rule
        /// is idempotent on its own output.
        #[test]
        fn date_normalization_is_idempotent(
            year in 1900u32..2024,
            month in 1u32..=12,
            day in 1u32..=28,
        ) {
            let iso = format!("{year:04}-{month:02}-{day:02}");
            let record = correct_date_format(&iso, "f", "x.txt", 1).unwrap();
            let expected = format!("{day:02}/{month:02}/{year:04}");
            prop_assert_eq!(&record.corrected_value, &expected);
            prop_assert!(
                correct_date_format(&record.corrected_value, "f", "x.txt", 1).is_none()
            );
        }
    }
}
