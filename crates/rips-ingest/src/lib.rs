//! RIPS data ingestion.
//!
//! Turns input files into uniform [`SourceFile`] values: kind detection
//! from the file name, blank-line skipping, comma-delimited field
//! splitting, and (for the consolidated JSON form) flattening of nested
//! user/service documents into the same positional rows the flat files
//! use. Raw-to-typed record conversion lives in [`parse`]; everything
//! upstream works on raw field vectors so the corrector can run before
//! records are built.

mod detect;
mod error;
mod flat_file;
mod json;
mod parse;

pub use detect::{detect_file_kind, list_rips_files};
pub use error::IngestError;
pub use flat_file::{RawRow, SourceFile, read_source_file};
pub use json::read_consolidated_json;
pub use parse::{FieldCountMismatch, parse_record, split_line};
