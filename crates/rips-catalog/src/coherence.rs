//! Finality coherence table.
//!
//! Maps a consultation/procedure finality code to the CUPS prefixes and
//! CIE10 chapter letters it is normally billed with. A missing entry means
//! "no constraint", not "invalid finality".

/// Expected procedure prefixes and diagnosis chapters for one finality code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalityRule {
    /// Allowed two-digit CUPS prefixes; `None` = any procedure.
    pub cups_prefixes: Option<&'static [&'static str]>,
    /// Allowed CIE10 chapter letters; `None` = any diagnosis.
    pub diagnosis_chapters: Option<&'static [char]>,
    /// Short label used in error messages.
    pub description: &'static str,
}

const FINALITY_RULES: &[(&str, FinalityRule)] = &[
    (
        "10",
        FinalityRule {
            cups_prefixes: Some(&["89"]),
            diagnosis_chapters: Some(&['Z']),
            description: "Detección temprana",
        },
    ),
    (
        "11",
        FinalityRule {
            cups_prefixes: Some(&["89"]),
            diagnosis_chapters: Some(&['Z']),
            description: "Detección temprana profesional",
        },
    ),
    (
        "20",
        FinalityRule {
            cups_prefixes: Some(&["89", "99"]),
            diagnosis_chapters: Some(&['Z']),
            description: "Protección específica (vacunación, etc.)",
        },
    ),
    (
        "30",
        FinalityRule {
            cups_prefixes: Some(&["87", "88", "89", "90"]),
            diagnosis_chapters: None,
            description: "Diagnóstico",
        },
    ),
    (
        "40",
        FinalityRule {
            cups_prefixes: None,
            diagnosis_chapters: None,
            description: "Tratamiento",
        },
    ),
    (
        "50",
        FinalityRule {
            cups_prefixes: Some(&["93"]),
            diagnosis_chapters: Some(&['G', 'M', 'S', 'T']),
            description: "Rehabilitación",
        },
    ),
    (
        "60",
        FinalityRule {
            cups_prefixes: None,
            diagnosis_chapters: Some(&['C', 'D']),
            description: "Paliación",
        },
    ),
];

/// Rule for a finality code, or `None` when the finality is unconstrained.
pub fn finality_rule(finality: &str) -> Option<&'static FinalityRule> {
    FINALITY_RULES
        .iter()
        .find(|(code, _)| *code == finality)
        .map(|(_, rule)| rule)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_finality_has_rule() {
        let rule = finality_rule("10").unwrap();
        assert_eq!(rule.cups_prefixes, Some(&["89"][..]));
        assert_eq!(rule.diagnosis_chapters, Some(&['Z'][..]));
    }

    #[test]
    fn test_treatment_is_unconstrained() {
        let rule = finality_rule("40").unwrap();
        assert!(rule.cups_prefixes.is_none());
        assert!(rule.diagnosis_chapters.is_none());
    }

    #[test]
    fn test_unknown_finality_means_no_constraint() {
        assert!(finality_rule("99").is_none());
        assert!(finality_rule("").is_none());
    }
}
