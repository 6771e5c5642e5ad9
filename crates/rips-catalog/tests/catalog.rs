//! Integration tests for the CIE10 catalog.

use rips_catalog::{Cie10Catalog, MAX_SUGGESTIONS, canonical_document_type, finality_rule};

#[test]
fn valid_codes_never_carry_suggestions() {
    let catalog = Cie10Catalog::with_default_codes();
    for code in ["A009", "E119", "I10X", "J189", "Z000", "M545"] {
        let result = catalog.validate_with_suggestion(code);
        assert!(result.is_valid, "{code} should be valid");
        assert!(
            result.suggestions.is_empty(),
            "{code} should not carry suggestions"
        );
    }
}

#[test]
fn invalid_code_suggestions_are_prefix_matches() {
    let catalog = Cie10Catalog::with_default_codes();
    // '0' is not a chapter letter, so the fallback cannot save this one.
    let result = catalog.validate_with_suggestion("0A9");
    assert!(!result.is_valid);
    assert!(result.suggestions.len() <= MAX_SUGGESTIONS);
}

#[test]
fn chapter_lookup_matches_first_letter() {
    let catalog = Cie10Catalog::with_default_codes();
    assert!(catalog.chapter("O23").unwrap().contains("Embarazo"));
    assert!(catalog.chapter("P07").unwrap().contains("perinatal"));
    assert!(catalog.chapter("007").is_none());
}

#[test]
fn synonym_and_finality_tables_are_consistent() {
    // Every synonym canonicalizes into the official document type set.
    for raw in ["CI", "C.C", "T.I.", "R.C", "C.E.", "DN"] {
        let canonical = canonical_document_type(raw).unwrap();
        assert!(rips_catalog::DOCUMENT_TYPES.contains(&canonical));
    }
    // Rehabilitation is constrained to physiotherapy-style procedures.
    let rule = finality_rule("50").unwrap();
    assert!(rule.cups_prefixes.unwrap().contains(&"93"));
}
