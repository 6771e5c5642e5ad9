//! Data model for RIPS billing extracts per Resolución 2275 de 2023.
//!
//! This crate defines the typed records for the nine RIPS file kinds, the
//! error and correction report types, and the run configuration consumed by
//! the validation engine. Raw-to-typed conversion happens only at the parse
//! boundary (see `rips-ingest`); everything here is immutable data.

pub mod correction;
pub mod error;
pub mod options;
pub mod records;
pub mod report;

pub use correction::{Confidence, CorrectionKind, CorrectionRecord};
pub use error::{ErrorCategory, ValidationError};
pub use options::{RunMode, RunOptions};
pub use records::{
    AcRecord, AfRecord, AhRecord, AmRecord, AnRecord, ApRecord, AtRecord, CtRecord, FileKind,
    FileRecord, UsRecord,
};
pub use report::{RunStatistics, ValidationReport};
