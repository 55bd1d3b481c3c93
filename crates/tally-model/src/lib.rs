//! Shared types for multi-file column frequency counting.
//!
//! This crate holds the data model used by every other tally crate:
//!
//! - **Aliases**: logical column names mapped to literal header spellings
//! - **Records**: one normalized data row, keyed by logical column
//! - **Constraints**: predicates that gate whether a record is counted
//! - **Counters**: per-value frequency tallies and their ranked entries
//!
//! It has no I/O of its own; reading files lives in `tally-ingest`,
//! aggregation in `tally-core` and output in `tally-report`.

mod alias;
mod constraint;
mod counter;
mod error;
mod record;

pub use alias::AliasTable;
pub use constraint::{Constraint, Operand, Operator};
pub use counter::{Counter, TopEntry};
pub use error::ConstraintError;
pub use record::{Record, RecordSchema};
