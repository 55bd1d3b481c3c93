//! Error types for report output.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Output path is unusable.
    #[error("cannot write report {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    /// Rows could not be encoded as delimited text.
    #[error("cannot render report: {reason}")]
    Render { reason: String },
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
