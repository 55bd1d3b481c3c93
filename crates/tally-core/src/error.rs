//! Error types for aggregation runs.

use std::path::PathBuf;

use tally_ingest::IngestError;
use tally_model::ConstraintError;
use thiserror::Error;

/// Errors raised while configuring or running an [`Aggregator`](crate::Aggregator).
#[derive(Debug, Error)]
pub enum CountError {
    /// A counter for this logical column is already registered.
    #[error("counter '{column}' is already registered")]
    DuplicateCounter { column: String },

    /// Constraint rejected at registration time.
    #[error("invalid constraint: {0}")]
    InvalidConstraint(#[from] ConstraintError),

    /// Constraint could not be evaluated against a row.
    #[error("constraint failed at row {row} of {path}: {source}")]
    Constraint {
        path: PathBuf,
        row: u64,
        #[source]
        source: ConstraintError,
    },

    /// Reading an input file failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Counters were read before a successful run.
    #[error("counters are not available until a run completes")]
    NotRun,
}

/// Result type for aggregation operations.
pub type Result<T> = std::result::Result<T, CountError>;
