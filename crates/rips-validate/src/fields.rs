//! Atomic field validators.
//!
//! Pure functions from a raw field value (plus its constraints) to an
//! optional violation message. `None` means the value passed. Violations
//! are plain strings here; the per-kind rules wrap them into
//! `ValidationError` values with field names and suggested fixes.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use rips_catalog::{
    DOCUMENT_TYPES, is_valid_age_unit, is_valid_document_type, is_valid_sex, is_valid_user_type,
    is_valid_zone,
};

/// CIE10: letter, two digits, optional trailing digit or X.
static CIE10_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]\d{2}[0-9X]?$").expect("valid CIE10 pattern"));

/// CUPS: exactly six digits.
static CUPS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{6}$").expect("valid CUPS pattern"));

/// Earliest plausible service date.
const MIN_YEAR: i32 = 1900;

pub fn is_empty(value: &str) -> bool {
    value.trim().is_empty()
}

/// Mandatory-field check.
pub fn check_required(value: &str, field_name: &str) -> Option<String> {
    if is_empty(value) {
        return Some(format!(
            "El campo '{field_name}' es obligatorio y no puede estar vacío (Res. 2275/2023)"
        ));
    }
    None
}

/// Maximum length in characters.
pub fn check_max_length(
    value: &str,
    field_name: &str,
    max_length: usize,
    required: bool,
) -> Option<String> {
    if is_empty(value) {
        if required {
            return Some(format!(
                "El campo '{field_name}' es obligatorio (Res. 2275/2023)"
            ));
        }
        return None;
    }
    let length = value.chars().count();
    if length > max_length {
        return Some(format!(
            "El campo '{field_name}' excede la longitud máxima de {max_length} caracteres. \
             Longitud actual: {length} (Res. 2275/2023)"
        ));
    }
    None
}

/// Exact length in characters.
pub fn check_exact_length(
    value: &str,
    field_name: &str,
    exact_length: usize,
    required: bool,
) -> Option<String> {
    if is_empty(value) {
        if required {
            return Some(format!(
                "El campo '{field_name}' es obligatorio (Res. 2275/2023)"
            ));
        }
        return None;
    }
    let length = value.chars().count();
    if length != exact_length {
        return Some(format!(
            "El campo '{field_name}' debe tener exactamente {exact_length} caracteres. \
             Longitud actual: {length} (Res. 2275/2023)"
        ));
    }
    None
}

/// Integer with optional bounds.
pub fn check_integer(
    value: &str,
    field_name: &str,
    required: bool,
    min_value: Option<i64>,
    max_value: Option<i64>,
) -> Option<String> {
    if is_empty(value) {
        if required {
            return Some(format!(
                "El campo numérico '{field_name}' es obligatorio (Res. 2275/2023)"
            ));
        }
        return None;
    }
    let Ok(number) = value.trim().parse::<i64>() else {
        return Some(format!(
            "El campo '{field_name}' debe ser un número entero. Valor recibido: '{value}' \
             (Res. 2275/2023)"
        ));
    };
    if let Some(min) = min_value
        && number < min
    {
        return Some(format!(
            "El campo '{field_name}' debe ser mayor o igual a {min}. Valor: {value} \
             (Res. 2275/2023)"
        ));
    }
    if let Some(max) = max_value
        && number > max
    {
        return Some(format!(
            "El campo '{field_name}' debe ser menor o igual a {max}. Valor: {value} \
             (Res. 2275/2023)"
        ));
    }
    None
}

/// Decimal with optional bounds.
pub fn check_decimal(
    value: &str,
    field_name: &str,
    required: bool,
    min_value: Option<f64>,
    max_value: Option<f64>,
) -> Option<String> {
    if is_empty(value) {
        if required {
            return Some(format!(
                "El campo numérico '{field_name}' es obligatorio (Res. 2275/2023)"
            ));
        }
        return None;
    }
    let Ok(number) = value.trim().parse::<f64>() else {
        return Some(format!(
            "El campo '{field_name}' debe ser un número decimal. Valor recibido: '{value}' \
             (Res. 2275/2023)"
        ));
    };
    if let Some(min) = min_value
        && number < min
    {
        return Some(format!(
            "El campo '{field_name}' debe ser mayor o igual a {min}. Valor: {value} \
             (Res. 2275/2023)"
        ));
    }
    if let Some(max) = max_value
        && number > max
    {
        return Some(format!(
            "El campo '{field_name}' debe ser menor o igual a {max}. Valor: {value} \
             (Res. 2275/2023)"
        ));
    }
    None
}

/// DD/MM/YYYY date, not in the future (relative to `reference_date`), not
/// before 1900. Returns the parsed date on success so range checks can
/// reuse it.
pub fn check_date(
    value: &str,
    field_name: &str,
    required: bool,
    reference_date: NaiveDate,
) -> Result<Option<NaiveDate>, String> {
    if is_empty(value) {
        if required {
            return Err(format!(
                "El campo '{field_name}' es obligatorio (Res. 2275/2023)"
            ));
        }
        return Ok(None);
    }

    let trimmed = value.trim();
    // Shape first: chrono would accept single-digit days.
    let well_formed = trimmed.len() == 10
        && trimmed
            .char_indices()
            .all(|(i, c)| if i == 2 || i == 5 { c == '/' } else { c.is_ascii_digit() });
    if !well_formed {
        return Err(format!(
            "El campo '{field_name}' debe tener formato DD/MM/YYYY. Valor recibido: '{value}' \
             (Res. 2275/2023)"
        ));
    }

    let Ok(date) = NaiveDate::parse_from_str(trimmed, "%d/%m/%Y") else {
        return Err(format!(
            "El campo '{field_name}' contiene una fecha inválida: '{value}' (Res. 2275/2023)"
        ));
    };

    if date > reference_date {
        return Err(format!(
            "El campo '{field_name}' no puede ser una fecha futura. Fecha: {value} \
             (Res. 2275/2023)"
        ));
    }
    if date.year() < MIN_YEAR {
        return Err(format!(
            "El campo '{field_name}' tiene una fecha no válida (anterior a 1900). Fecha: {value}"
        ));
    }

    Ok(Some(date))
}

/// Paired start ≤ end check. Either date failing its own format check
/// surfaces that failure instead.
pub fn check_date_range(
    start: &str,
    end: &str,
    start_field: &str,
    end_field: &str,
    reference_date: NaiveDate,
) -> Option<String> {
    let start_date = match check_date(start, start_field, true, reference_date) {
        Ok(date) => date,
        Err(message) => return Some(message),
    };
    let end_date = match check_date(end, end_field, true, reference_date) {
        Ok(date) => date,
        Err(message) => return Some(message),
    };
    if let (Some(from), Some(to)) = (start_date, end_date)
        && from > to
    {
        return Some(format!(
            "La fecha '{start_field}' ({start}) no puede ser posterior a '{end_field}' ({end}) \
             (Res. 2275/2023)"
        ));
    }
    None
}

/// Document type against the official set.
pub fn check_document_type(value: &str, field_name: &str) -> Option<String> {
    if is_empty(value) {
        return Some(format!(
            "El campo '{field_name}' es obligatorio (Res. 2275/2023)"
        ));
    }
    if !is_valid_document_type(value) {
        return Some(format!(
            "El campo '{field_name}' contiene un tipo de documento inválido: '{value}'. \
             Valores permitidos: {} (Res. 2275/2023)",
            DOCUMENT_TYPES.join(", ")
        ));
    }
    None
}

/// Sex: M or F.
pub fn check_sex(value: &str, field_name: &str) -> Option<String> {
    if is_empty(value) {
        return Some(format!(
            "El campo '{field_name}' es obligatorio (Res. 2275/2023)"
        ));
    }
    if !is_valid_sex(value) {
        return Some(format!(
            "El campo '{field_name}' debe ser 'M' o 'F'. Valor recibido: '{value}' \
             (Res. 2275/2023)"
        ));
    }
    None
}

/// Age unit: 1 (years), 2 (months), 3 (days).
pub fn check_age_unit(value: &str, field_name: &str) -> Option<String> {
    if is_empty(value) {
        return Some(format!(
            "El campo '{field_name}' es obligatorio (Res. 2275/2023)"
        ));
    }
    if !is_valid_age_unit(value) {
        return Some(format!(
            "El campo '{field_name}' debe ser '1' (años), '2' (meses) o '3' (días). \
             Valor: '{value}' (Res. 2275/2023)"
        ));
    }
    None
}

/// Residential zone: U or R.
pub fn check_zone(value: &str, field_name: &str) -> Option<String> {
    if is_empty(value) {
        return Some(format!(
            "El campo '{field_name}' es obligatorio (Res. 2275/2023)"
        ));
    }
    if !is_valid_zone(value) {
        return Some(format!(
            "El campo '{field_name}' debe ser 'U' (Urbana) o 'R' (Rural). Valor: '{value}' \
             (Res. 2275/2023)"
        ));
    }
    None
}

/// User type: 1-4.
pub fn check_user_type(value: &str, field_name: &str) -> Option<String> {
    if is_empty(value) {
        return Some(format!(
            "El campo '{field_name}' es obligatorio (Res. 2275/2023)"
        ));
    }
    if !is_valid_user_type(value) {
        return Some(format!(
            "El campo '{field_name}' debe ser: 1 (Contributivo), 2 (Subsidiado), \
             3 (Vinculado), 4 (Particular). Valor: '{value}' (Res. 2275/2023)"
        ));
    }
    None
}

/// CIE10 code shape (catalog membership is a separate, lenient check).
pub fn check_cie10_format(value: &str, field_name: &str, required: bool) -> Option<String> {
    if is_empty(value) {
        if required {
            return Some(format!(
                "El campo '{field_name}' es obligatorio cuando aplica (Res. 2275/2023)"
            ));
        }
        return None;
    }
    if !CIE10_PATTERN.is_match(value) {
        return Some(format!(
            "El campo '{field_name}' no cumple con el formato CIE10 válido. Valor: '{value}'. \
             Formato esperado: Letra + 2 dígitos + opcional(dígito/X) (Res. 2275/2023, 3280/2018)"
        ));
    }
    None
}

/// CUPS code shape: exactly six digits.
pub fn check_cups_format(value: &str, field_name: &str, required: bool) -> Option<String> {
    if is_empty(value) {
        if required {
            return Some(format!(
                "El campo '{field_name}' es obligatorio (Res. 2275/2023)"
            ));
        }
        return None;
    }
    if !CUPS_PATTERN.is_match(value) {
        return Some(format!(
            "El campo '{field_name}' debe ser un código CUPS de 6 dígitos. Valor: '{value}' \
             (Res. 2275/2023)"
        ));
    }
    None
}
