//! Row ingestion for column frequency counting.
//!
//! This crate turns delimited text files into streams of normalized
//! [`Record`](tally_model::Record)s keyed by logical column name.
//!
//! # Features
//!
//! - **Alias Resolution**: Map logical columns to whatever header spelling a file uses
//! - **Normalization**: Tolerant decoding, artifact stripping, trimming and case folding
//! - **Streaming**: One file open at a time, one row in memory at a time
//! - **Discovery**: Find input files in a drop directory
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tally_ingest::{RowSource, SourceOptions};
//! use tally_model::AliasTable;
//!
//! let mut aliases = AliasTable::new();
//! aliases.add("state", "WORKSITE_STATE");
//!
//! let columns = vec!["state".to_string()];
//! let source = RowSource::open(Path::new("input/h1b.csv"), &columns, &aliases, &SourceOptions::default())?;
//! for record in source {
//!     println!("{:?}", record?.get("state"));
//! }
//! ```

mod discovery;
mod error;
mod header;
mod normalize;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === Row Streaming ===
pub use header::resolve_column;
pub use normalize::{CaseFold, Normalizer};
pub use source::{RowSource, SourceOptions};

// === File Discovery ===
pub use discovery::{INPUT_EXTENSIONS, list_input_files, resolve_inputs};

// Re-exported so callers can pick an input encoding without a direct dependency.
pub use encoding_rs::Encoding;
