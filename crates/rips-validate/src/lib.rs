//! RIPS validation engine.
//!
//! Field validators, per-kind record rules, coherence rules, the
//! cross-file reference index with duplicate detection, and the
//! three-phase engine that aggregates everything into a
//! [`rips_model::ValidationReport`].
//!
//! Rule violations are returned as values, never thrown; a run always
//! completes and always produces a report.

pub mod cie10_check;
pub mod coherence;
pub mod cross_file;
pub mod engine;
pub mod fields;
pub mod rules;

pub use cie10_check::validate_cie10_codes;
pub use coherence::{
    validate_age_diagnosis, validate_finality, validate_record_coherence, validate_sex_diagnosis,
};
pub use cross_file::{
    AttentionEntry, AttentionKey, AttentionKind, AttentionLog, ReferenceIndex, validate_references,
};
pub use engine::{EngineOutput, ValidationEngine};
pub use rules::validate_record;
