//! Cross-field semantic coherence rules.
//!
//! All rules here are advisory: they report likely inconsistencies between
//! finality, procedure, diagnosis, sex, and age, and none of them is ever
//! auto-corrected.

use rips_catalog::finality_rule;
use rips_model::{ErrorCategory, FileRecord, ValidationError};

const RULE: &str = "Res. 2275/2023 - Validación de coherencia";

/// Senile-onset diagnoses implausible under 40 years (Parkinson, Alzheimer).
const SENILE_ONSET_CODES: &[&str] = &["G20X", "G30X"];

/// Age in years below which perinatal ('P' chapter) codes are coherent
/// (roughly one month).
const PERINATAL_MAX_YEARS: f64 = 0.1;

const SENILE_MIN_YEARS: f64 = 40.0;

/// Run every coherence rule that applies to the record kind (AC and AP).
pub fn validate_record_coherence(
    record: &FileRecord,
    file_name: &str,
    line_number: usize,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    match record {
        FileRecord::Ac(ac) => {
            errors.extend(validate_finality(
                &ac.finalidad_consulta,
                &ac.cod_consulta,
                &ac.diagnostico_principal,
                file_name,
                line_number,
            ));
            errors.extend(validate_sex_diagnosis(
                &ac.sexo,
                &ac.diagnostico_principal,
                file_name,
                line_number,
            ));
            errors.extend(validate_age_diagnosis(
                &ac.edad,
                &ac.unidad_medida_edad,
                &ac.diagnostico_principal,
                file_name,
                line_number,
            ));
        }
        FileRecord::Ap(ap) => {
            errors.extend(validate_finality(
                &ap.finalidad_procedimiento,
                &ap.cod_procedimiento,
                &ap.diagnostico_principal,
                file_name,
                line_number,
            ));
            errors.extend(validate_sex_diagnosis(
                &ap.sexo,
                &ap.diagnostico_principal,
                file_name,
                line_number,
            ));
            errors.extend(validate_age_diagnosis(
                &ap.edad,
                &ap.unidad_medida_edad,
                &ap.diagnostico_principal,
                file_name,
                line_number,
            ));
        }
        _ => {}
    }
    errors
}

/// finality ↔ CUPS prefix ↔ diagnosis chapter. A finality outside the table
/// is unconstrained.
pub fn validate_finality(
    finalidad: &str,
    codigo_cups: &str,
    diagnostico: &str,
    file_name: &str,
    line_number: usize,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let Some(rule) = finality_rule(finalidad) else {
        return errors;
    };

    if let Some(prefixes) = rule.cups_prefixes
        && !codigo_cups.is_empty()
    {
        let cups_prefix: String = codigo_cups.chars().take(2).collect();
        if !prefixes.contains(&cups_prefix.as_str()) {
            errors.push(ValidationError::new(
                file_name,
                line_number,
                "finalidad/codigo_procedimiento",
                format!(
                    "Posible incoherencia: La finalidad '{finalidad}' ({}) generalmente no \
                     corresponde con el procedimiento CUPS '{codigo_cups}'. Se esperan \
                     procedimientos que inicien con: {}",
                    rule.description,
                    prefixes.join(", ")
                ),
                RULE,
                "Verificar que la finalidad y el procedimiento sean coherentes. \
                 Consultar con el área de facturación.",
                ErrorCategory::Coherence,
            ));
        }
    }

    if let Some(chapters) = rule.diagnosis_chapters
        && let Some(chapter) = diagnostico.chars().next()
        && !chapters.contains(&chapter)
    {
        let expected: Vec<String> = chapters.iter().map(char::to_string).collect();
        errors.push(ValidationError::new(
            file_name,
            line_number,
            "finalidad/diagnostico",
            format!(
                "Posible incoherencia: La finalidad '{finalidad}' ({}) generalmente no \
                 corresponde con diagnósticos del capítulo '{chapter}' (CIE10: {diagnostico}). \
                 Se esperan diagnósticos de capítulos: {}",
                rule.description,
                expected.join(", ")
            ),
            RULE,
            "Verificar que la finalidad y el diagnóstico sean coherentes. \
             Consultar con el área médica.",
            ErrorCategory::Coherence,
        ));
    }

    errors
}

/// Chapter 'O' and the reproductive sub-ranges of 'N' are sex-exclusive.
pub fn validate_sex_diagnosis(
    sexo: &str,
    diagnostico: &str,
    file_name: &str,
    line_number: usize,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if diagnostico.is_empty() || sexo.is_empty() {
        return errors;
    }

    let sub_range = n_chapter_sub_range(diagnostico);
    let female_exclusive = diagnostico.starts_with('O')
        || sub_range.is_some_and(|n| n == 76 || (80..=98).contains(&n));
    let male_exclusive = sub_range.is_some_and(|n| (40..=51).contains(&n));

    if sexo == "M" && female_exclusive {
        errors.push(ValidationError::new(
            file_name,
            line_number,
            "sexo/diagnostico",
            format!(
                "Incoherencia de género: Paciente masculino (M) con diagnóstico \
                 '{diagnostico}' que es exclusivo de mujeres (embarazo, ginecología)"
            ),
            RULE,
            "Verificar el sexo del paciente o el código de diagnóstico",
            ErrorCategory::Coherence,
        ));
    }
    if sexo == "F" && male_exclusive {
        errors.push(ValidationError::new(
            file_name,
            line_number,
            "sexo/diagnostico",
            format!(
                "Incoherencia de género: Paciente femenino (F) con diagnóstico \
                 '{diagnostico}' que es exclusivo de hombres (próstata, etc.)"
            ),
            RULE,
            "Verificar el sexo del paciente o el código de diagnóstico",
            ErrorCategory::Coherence,
        ));
    }

    errors
}

/// Perinatal codes above ~1 month of age, senile-onset codes under 40.
pub fn validate_age_diagnosis(
    edad: &str,
    unidad_edad: &str,
    diagnostico: &str,
    file_name: &str,
    line_number: usize,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if diagnostico.is_empty() {
        return errors;
    }
    let Ok(edad_num) = edad.trim().parse::<i64>() else {
        return errors;
    };

    let years = match unidad_edad.trim() {
        "2" => edad_num as f64 / 12.0,
        "3" => edad_num as f64 / 365.0,
        _ => edad_num as f64,
    };
    let unit_label = match unidad_edad.trim() {
        "2" => "meses",
        "3" => "días",
        _ => "años",
    };

    if diagnostico.starts_with('P') && years > PERINATAL_MAX_YEARS {
        errors.push(ValidationError::new(
            file_name,
            line_number,
            "edad/diagnostico",
            format!(
                "Incoherencia de edad: Paciente con edad {edad} {unit_label} con diagnóstico \
                 perinatal '{diagnostico}' que es típico de recién nacidos"
            ),
            RULE,
            "Verificar la edad del paciente o el código de diagnóstico",
            ErrorCategory::Coherence,
        ));
    }

    if SENILE_ONSET_CODES.contains(&diagnostico) && years < SENILE_MIN_YEARS {
        errors.push(ValidationError::new(
            file_name,
            line_number,
            "edad/diagnostico",
            format!(
                "Incoherencia de edad: Paciente con edad {edad} {unit_label} con diagnóstico \
                 '{diagnostico}' que es poco común en esta edad"
            ),
            RULE,
            "Verificar la edad del paciente o el código de diagnóstico",
            ErrorCategory::Coherence,
        ));
    }

    errors
}

/// Two-digit sub-range of an 'N' chapter code, when present.
fn n_chapter_sub_range(diagnostico: &str) -> Option<u32> {
    if !diagnostico.starts_with('N') {
        return None;
    }
    diagnostico.get(1..3)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_male_with_obstetric_diagnosis() {
        let errors = validate_sex_diagnosis("M", "O23X", "AC0001.txt", 3);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field_name, "sexo/diagnostico");
        assert_eq!(errors[0].category, ErrorCategory::Coherence);
    }

    #[test]
    fn test_female_with_prostate_range_diagnosis() {
        let errors = validate_sex_diagnosis("F", "N40X", "AC0001.txt", 3);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_matching_sex_passes() {
        assert!(validate_sex_diagnosis("F", "O23X", "AC0001.txt", 3).is_empty());
        assert!(validate_sex_diagnosis("M", "N40X", "AC0001.txt", 3).is_empty());
        assert!(validate_sex_diagnosis("M", "J189", "AC0001.txt", 3).is_empty());
        // N sub-ranges outside the exclusive bands are unconstrained.
        assert!(validate_sex_diagnosis("M", "N390", "AC0001.txt", 3).is_empty());
    }

    #[test]
    fn test_perinatal_code_on_adult() {
        let errors = validate_age_diagnosis("30", "1", "P07X", "AC0001.txt", 1);
        assert_eq!(errors.len(), 1);
        // Fifteen days old is fine.
        assert!(validate_age_diagnosis("15", "3", "P07X", "AC0001.txt", 1).is_empty());
    }

    #[test]
    fn test_senile_code_on_child() {
        let errors = validate_age_diagnosis("12", "1", "G20X", "AC0001.txt", 1);
        assert_eq!(errors.len(), 1);
        assert!(validate_age_diagnosis("70", "1", "G20X", "AC0001.txt", 1).is_empty());
    }

    #[test]
    fn test_finality_constraints() {
        // Early detection expects CUPS 89xxxx and Z-chapter diagnoses.
        let errors = validate_finality("10", "890201", "Z000", "AC0001.txt", 1);
        assert!(errors.is_empty());

        let errors = validate_finality("10", "930101", "Z000", "AC0001.txt", 1);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field_name, "finalidad/codigo_procedimiento");

        let errors = validate_finality("10", "890201", "A009", "AC0001.txt", 1);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field_name, "finalidad/diagnostico");

        // Unknown finality means no constraint.
        assert!(validate_finality("77", "930101", "A009", "AC0001.txt", 1).is_empty());
    }
}
