//! Flat-file loading.

use std::path::Path;

use tracing::debug;

use rips_model::FileKind;

use crate::detect::detect_file_kind;
use crate::error::IngestError;
use crate::parse::split_line;

/// One non-blank input line, split into raw fields. The field count is not
/// checked here; the engine reports mismatches as structural errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number in the source file.
    pub line_number: usize,
    pub fields: Vec<String>,
}

/// A loaded input file: kind plus its raw rows in input order.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// File name without directory components.
    pub name: String,
    pub kind: FileKind,
    pub rows: Vec<RawRow>,
}

/// Read a RIPS flat file into raw rows.
///
/// The kind is detected from the file name; blank lines are skipped but
/// keep their line numbers. Bytes that are not valid UTF-8 are replaced
/// rather than aborting the file.
pub fn read_source_file(path: &Path) -> Result<SourceFile, IngestError> {
    let name = path
        .file_name()
        .and_then(|v| v.to_str())
        .unwrap_or_default()
        .to_string();

    let kind = detect_file_kind(&name).ok_or_else(|| IngestError::UnrecognizedFileName {
        name: name.clone(),
    })?;

    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8_lossy(&bytes);

    let mut rows = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        rows.push(RawRow {
            line_number: index + 1,
            fields: split_line(line),
        });
    }

    debug!(file = %name, kind = %kind, rows = rows.len(), "loaded flat file");
    Ok(SourceFile { name, kind, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_source_file_skips_blank_lines() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("CT0001.txt");
        std::fs::write(&path, "a,b,c\n\n   \nd,e,f\n").unwrap();

        let file = read_source_file(&path).unwrap();
        assert_eq!(file.kind, FileKind::Ct);
        assert_eq!(file.rows.len(), 2);
        assert_eq!(file.rows[0].line_number, 1);
        assert_eq!(file.rows[1].line_number, 4);
        assert_eq!(file.rows[1].fields, vec!["d", "e", "f"]);
    }

    #[test]
    fn test_unrecognized_name_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("resumen.txt");
        std::fs::write(&path, "x").unwrap();

        let result = read_source_file(&path);
        assert!(matches!(
            result,
            Err(IngestError::UnrecognizedFileName { .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_degrades_to_replacement() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("US0001.txt");
        std::fs::write(&path, b"CC,123,EPS\xFF01,1\n").unwrap();

        let file = read_source_file(&path).unwrap();
        assert_eq!(file.rows.len(), 1);
        assert!(file.rows[0].fields[2].contains('\u{FFFD}'));
    }
}
