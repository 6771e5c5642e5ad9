//! Reference catalogs for RIPS validation.
//!
//! This crate holds the data the validators consult: the CIE10 diagnosis
//! catalog (curated table, chapter fallback, prefix suggestions, optional
//! CSV extension), the fixed code sets of Resolución 2275 de 2023, the
//! document-type synonym table used by the auto-corrector, and the
//! finality coherence table.
//!
//! Catalogs are explicitly constructed, immutable values injected into
//! validators; there is no global singleton and no interior mutability, so
//! lookups are safe to share across threads.

mod cie10;
mod codesets;
mod coherence;
mod data;
mod error;

pub use cie10::{Cie10Catalog, Cie10Validation, MAX_SUGGESTIONS, SUGGESTION_PREFIX_LEN};
pub use codesets::{
    AGE_UNITS, DOCUMENT_TYPES, SEX_VALUES, USER_TYPES, ZONES, canonical_document_type,
    is_valid_age_unit, is_valid_document_type, is_valid_sex, is_valid_user_type, is_valid_zone,
};
pub use coherence::{FinalityRule, finality_rule};
pub use error::CatalogError;
