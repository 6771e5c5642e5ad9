//! Fixed code sets of Resolución 2275 de 2023 and the document-type
//! synonym table used by the auto-corrector.

/// Document types accepted in identity fields.
pub const DOCUMENT_TYPES: &[&str] = &[
    "CC", "TI", "RC", "CE", "PA", "MS", "AS", "CD", "SC", "PE", "PT", "NI",
];

/// Sex values: M (masculino), F (femenino).
pub const SEX_VALUES: &[&str] = &["M", "F"];

/// Age units: 1 = years, 2 = months, 3 = days.
pub const AGE_UNITS: &[&str] = &["1", "2", "3"];

/// Residential zones: U (urbana), R (rural).
pub const ZONES: &[&str] = &["U", "R"];

/// User types: 1 = contributivo, 2 = subsidiado, 3 = vinculado,
/// 4 = particular.
pub const USER_TYPES: &[&str] = &["1", "2", "3", "4"];

/// Frequent misspellings of document types mapped to their canonical code.
const DOCUMENT_TYPE_SYNONYMS: &[(&str, &str)] = &[
    ("CI", "CC"),
    ("C.C", "CC"),
    ("C.C.", "CC"),
    ("T.I", "TI"),
    ("T.I.", "TI"),
    ("R.C", "RC"),
    ("R.C.", "RC"),
    ("C.E", "CE"),
    ("C.E.", "CE"),
    ("DN", "CC"),
];

pub fn is_valid_document_type(value: &str) -> bool {
    DOCUMENT_TYPES.contains(&value)
}

pub fn is_valid_sex(value: &str) -> bool {
    SEX_VALUES.contains(&value)
}

pub fn is_valid_age_unit(value: &str) -> bool {
    AGE_UNITS.contains(&value)
}

pub fn is_valid_zone(value: &str) -> bool {
    ZONES.contains(&value)
}

pub fn is_valid_user_type(value: &str) -> bool {
    USER_TYPES.contains(&value)
}

/// Canonical document type for a known synonym. Matching is done on the
/// trimmed, uppercased input; `None` means the value is not in the table
/// (it may still be a valid code already).
pub fn canonical_document_type(value: &str) -> Option<&'static str> {
    let normalized = value.trim().to_uppercase();
    DOCUMENT_TYPE_SYNONYMS
        .iter()
        .find(|(synonym, _)| *synonym == normalized)
        .map(|(_, canonical)| *canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_set_membership() {
        assert!(is_valid_document_type("CC"));
        assert!(!is_valid_document_type("XX"));
        assert!(is_valid_sex("F"));
        assert!(!is_valid_sex("X"));
        assert!(is_valid_age_unit("3"));
        assert!(!is_valid_age_unit("4"));
        assert!(is_valid_zone("R"));
        assert!(!is_valid_zone("S"));
        assert!(is_valid_user_type("4"));
        assert!(!is_valid_user_type("5"));
    }

    #[test]
    fn test_document_type_synonyms() {
        assert_eq!(canonical_document_type("C.C"), Some("CC"));
        assert_eq!(canonical_document_type("c.c."), Some("CC"));
        assert_eq!(canonical_document_type("DN"), Some("CC"));
        assert_eq!(canonical_document_type("T.I"), Some("TI"));
        // Already canonical values are not in the synonym table.
        assert_eq!(canonical_document_type("CC"), None);
        assert_eq!(canonical_document_type("ZZ"), None);
    }
}
