//! Error types for row ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering or reading input files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read a file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input directory holds no delimited files.
    #[error("no input files found in {path}")]
    NoInputFiles { path: PathBuf },

    // === Parsing Errors ===
    /// File has no header row.
    #[error("file is empty (no header row): {path}")]
    EmptyFile { path: PathBuf },

    /// Logical column matches neither its own name nor any alias.
    #[error("column '{column}' not found in {path} (tried: {})", .candidates.join(", "))]
    ColumnResolution {
        path: PathBuf,
        column: String,
        candidates: Vec<String>,
    },

    /// Data row field count differs from the header.
    #[error("malformed row {row} in {path}: expected {expected} fields, found {found}")]
    MalformedRow {
        path: PathBuf,
        row: u64,
        expected: usize,
        found: usize,
    },

    /// Delimited-text parser failure.
    #[error("failed to parse {path} at row {row}: {message}")]
    Csv {
        path: PathBuf,
        row: u64,
        message: String,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
