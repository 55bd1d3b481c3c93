//! Input file discovery.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// File extensions treated as delimited text.
pub const INPUT_EXTENSIONS: &[&str] = &["csv", "txt", "tsv"];

/// Lists all delimited input files in a directory.
///
/// Hidden files are skipped. Returns files sorted by filename.
pub fn list_input_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let hidden = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with('.'));
        if hidden {
            continue;
        }

        let is_input = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                INPUT_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            });

        if is_input {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    tracing::debug!(dir = %dir.display(), file_count = files.len(), "discovered input files");

    Ok(files)
}

/// Expands an input argument into the files to process.
///
/// A file is used as-is; a directory is scanned with [`list_input_files`]
/// and must contain at least one input file.
pub fn resolve_inputs(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.exists() {
        return Err(IngestError::FileNotFound {
            path: input.to_path_buf(),
        });
    }
    let files = list_input_files(input)?;
    if files.is_empty() {
        return Err(IngestError::NoInputFiles {
            path: input.to_path_buf(),
        });
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();

        for name in &["h1b_2016.csv", "H1B_2015.CSV", "notes.md", ".h1b_2014.csv", "h1b_2017.txt"] {
            let path = dir.path().join(name);
            std::fs::write(&path, "header\ndata").unwrap();
        }
        std::fs::create_dir(dir.path().join("archive.csv")).unwrap();

        dir
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_list_input_files() {
        let dir = create_test_dir();
        let files = list_input_files(dir.path()).unwrap();

        assert_eq!(
            names(&files),
            vec!["H1B_2015.CSV", "h1b_2016.csv", "h1b_2017.txt"]
        );
    }

    #[test]
    fn test_list_input_files_not_a_directory() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("test.csv");
        std::fs::write(&file_path, "data").unwrap();

        let result = list_input_files(&file_path);
        assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_resolve_inputs_single_file() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("h1b.csv");
        std::fs::write(&file_path, "data").unwrap();

        assert_eq!(resolve_inputs(&file_path).unwrap(), vec![file_path]);
    }

    #[test]
    fn test_resolve_inputs_empty_dir() {
        let dir = TempDir::new().unwrap();
        let result = resolve_inputs(dir.path());
        assert!(matches!(result, Err(IngestError::NoInputFiles { .. })));
    }

    #[test]
    fn test_resolve_inputs_missing_path() {
        let dir = TempDir::new().unwrap();
        let result = resolve_inputs(&dir.path().join("input"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
