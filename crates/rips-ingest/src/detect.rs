//! File discovery and kind detection.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use rips_model::FileKind;

use crate::error::IngestError;

/// File names embed the kind code followed by digits, e.g. `AF000123.txt`.
static FILE_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(AF|US|AC|AP|AT|AH|AM|AN|CT)\d+\.txt$").expect("valid file name pattern")
});

/// Detect the RIPS kind from a file name. Case-insensitive; `None` when the
/// name does not follow the mandated pattern.
pub fn detect_file_kind(file_name: &str) -> Option<FileKind> {
    let captures = FILE_NAME_PATTERN.captures(file_name)?;
    FileKind::from_str(captures.get(1)?.as_str()).ok()
}

/// List all `.txt` files in a directory, sorted by file name so runs are
/// reproducible regardless of directory iteration order.
pub fn list_rips_files(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|source| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|source| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_txt = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("txt"))
            .unwrap_or(false);
        if is_txt {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_file_kind() {
        assert_eq!(detect_file_kind("AF000123.txt"), Some(FileKind::Af));
        assert_eq!(detect_file_kind("us0001.TXT"), Some(FileKind::Us));
        assert_eq!(detect_file_kind("ruta/AC987654321.txt"), Some(FileKind::Ac));
        assert_eq!(detect_file_kind("CT1.txt"), Some(FileKind::Ct));
    }

    #[test]
    fn test_detect_rejects_nonconforming_names() {
        assert_eq!(detect_file_kind("AF.txt"), None);
        assert_eq!(detect_file_kind("AFX123.txt"), None);
        assert_eq!(detect_file_kind("AF000123.csv"), None);
        assert_eq!(detect_file_kind("informe.txt"), None);
    }

    #[test]
    fn test_list_rips_files_sorted() {
        let dir = tempfile::TempDir::new().unwrap();
        for name in ["US0002.txt", "AF0001.txt", "notas.md"] {
            std::fs::write(dir.path().join(name), "x").unwrap();
        }
        let files = list_rips_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["AF0001.txt", "US0002.txt"]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let result = list_rips_files(Path::new("/definitely/not/here"));
        assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
    }
}
