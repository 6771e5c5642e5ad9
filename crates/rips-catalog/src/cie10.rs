//! CIE10 diagnosis catalog with lenient chapter fallback and prefix-based
//! suggestions.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::data::{CHAPTERS, CODES};
use crate::error::CatalogError;

/// Maximum number of suggestions returned for an invalid code.
pub const MAX_SUGGESTIONS: usize = 5;

/// Number of leading characters matched when suggesting alternatives.
pub const SUGGESTION_PREFIX_LEN: usize = 3;

/// Outcome of validating a code against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cie10Validation {
    pub is_valid: bool,
    pub message: String,
    /// Curated codes sharing the first three characters, at most
    /// [`MAX_SUGGESTIONS`], in catalog key order. Empty for valid codes.
    pub suggestions: Vec<String>,
}

/// Code-to-description catalog plus the chapter table backing the lenient
/// fallback. Immutable after construction; lookups have no side effects.
#[derive(Debug, Clone)]
pub struct Cie10Catalog {
    codes: BTreeMap<String, String>,
    chapters: BTreeMap<char, &'static str>,
}

impl Default for Cie10Catalog {
    fn default() -> Self {
        Self::with_default_codes()
    }
}

/// Row shape accepted by [`Cie10Catalog::extend_from_csv`].
#[derive(Debug, Deserialize)]
struct Cie10CsvRow {
    codigo: String,
    descripcion: String,
}

impl Cie10Catalog {
    /// Catalog seeded with the embedded curated table.
    pub fn with_default_codes() -> Self {
        let codes = CODES
            .iter()
            .map(|(code, description)| ((*code).to_string(), (*description).to_string()))
            .collect();
        Self {
            codes,
            chapters: CHAPTERS.iter().copied().collect(),
        }
    }

    /// Empty catalog (chapter table only). Useful in tests that need the
    /// fallback behavior in isolation.
    pub fn empty() -> Self {
        Self {
            codes: BTreeMap::new(),
            chapters: CHAPTERS.iter().copied().collect(),
        }
    }

    /// Merge additional codes from a CSV file with `codigo,descripcion`
    /// headers. Existing entries are overwritten by the file's.
    pub fn extend_from_csv(&mut self, path: &Path) -> Result<usize, CatalogError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|source| CatalogError::CsvRead {
                path: path.to_path_buf(),
                source,
            })?;

        let mut loaded = 0usize;
        for result in reader.deserialize::<Cie10CsvRow>() {
            let row = result.map_err(|source| CatalogError::CsvRead {
                path: path.to_path_buf(),
                source,
            })?;
            let code = row.codigo.trim().to_uppercase();
            if code.is_empty() {
                continue;
            }
            self.codes.insert(code, row.descripcion.trim().to_string());
            loaded += 1;
        }
        Ok(loaded)
    }

    /// Number of codes in the curated table.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// True when the code is present in the curated table (strict check,
    /// no chapter fallback).
    pub fn is_known_code(&self, code: &str) -> bool {
        self.codes.contains_key(code)
    }

    /// Lenient validity: a code is accepted when it is in the curated table
    /// or when its first letter names a known chapter. The catalog is
    /// intentionally partial, so codes outside it are given the benefit of
    /// the doubt rather than flagged.
    pub fn is_valid_code(&self, code: &str) -> bool {
        if code.is_empty() {
            return false;
        }
        if self.is_known_code(code) {
            return true;
        }
        code.chars()
            .next()
            .is_some_and(|letter| self.chapters.contains_key(&letter))
    }

    /// Description for a curated code.
    pub fn description(&self, code: &str) -> Option<&str> {
        self.codes.get(code).map(String::as_str)
    }

    /// Chapter description for the code's first letter.
    pub fn chapter(&self, code: &str) -> Option<&'static str> {
        let letter = code.chars().next()?;
        self.chapters.get(&letter).copied()
    }

    /// Curated codes sharing the code's three-character prefix, in catalog
    /// key order, capped at [`MAX_SUGGESTIONS`]. No distance ranking.
    pub fn suggest_similar(&self, code: &str) -> Vec<String> {
        if code.chars().count() < 2 {
            return Vec::new();
        }
        let prefix: String = code.chars().take(SUGGESTION_PREFIX_LEN).collect();
        self.codes
            .keys()
            .filter(|candidate| candidate.starts_with(&prefix))
            .take(MAX_SUGGESTIONS)
            .cloned()
            .collect()
    }

    /// Validate a code, producing a message and suggestions when invalid.
    pub fn validate_with_suggestion(&self, code: &str) -> Cie10Validation {
        if self.is_valid_code(code) {
            let detail = self
                .description(code)
                .or_else(|| self.chapter(code))
                .unwrap_or_default();
            return Cie10Validation {
                is_valid: true,
                message: format!("Código válido: {detail}"),
                suggestions: Vec::new(),
            };
        }

        let suggestions = self.suggest_similar(code);
        let message = if suggestions.is_empty() {
            "Código no válido y sin sugerencias disponibles".to_string()
        } else {
            "Código no encontrado en catálogo vigente".to_string()
        };
        Cie10Validation {
            is_valid: false,
            message,
            suggestions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_curated_code_is_valid_without_suggestions() {
        let catalog = Cie10Catalog::with_default_codes();
        let result = catalog.validate_with_suggestion("A009");
        assert!(result.is_valid);
        assert!(result.suggestions.is_empty());
        assert!(result.message.contains("Cólera"));
    }

    #[test]
    fn test_chapter_fallback_accepts_uncurated_code() {
        let catalog = Cie10Catalog::with_default_codes();
        // Not in the curated table but chapter 'J' exists.
        assert!(!catalog.is_known_code("J45"));
        assert!(catalog.is_valid_code("J45"));
    }

    #[test]
    fn test_unknown_chapter_is_invalid() {
        let catalog = Cie10Catalog::with_default_codes();
        // 'U' is not in the chapter table.
        let result = catalog.validate_with_suggestion("U07");
        assert!(!result.is_valid);
    }

    #[test]
    fn test_suggestions_use_three_char_prefix_capped_at_five() {
        let catalog = Cie10Catalog::empty();
        let mut seeded = catalog;
        for code in ["A00", "A000", "A001", "A002", "A003", "A004", "A009"] {
            seeded.codes.insert(code.to_string(), String::new());
        }
        let suggestions = seeded.suggest_similar("A00Z");
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
        assert_eq!(suggestions[0], "A00");
        assert!(suggestions.iter().all(|code| code.starts_with("A00")));
    }

    #[test]
    fn test_short_code_yields_no_suggestions() {
        let catalog = Cie10Catalog::with_default_codes();
        assert!(catalog.suggest_similar("A").is_empty());
        assert!(catalog.suggest_similar("").is_empty());
    }

    #[test]
    fn test_extend_from_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "codigo,descripcion").unwrap();
        writeln!(file, "U071,COVID-19 virus identificado").unwrap();
        file.flush().unwrap();

        let mut catalog = Cie10Catalog::with_default_codes();
        let loaded = catalog.extend_from_csv(file.path()).unwrap();
        assert_eq!(loaded, 1);
        assert!(catalog.is_known_code("U071"));
        assert_eq!(
            catalog.description("U071"),
            Some("COVID-19 virus identificado")
        );
    }
}
