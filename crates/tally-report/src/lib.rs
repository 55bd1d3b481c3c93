//! Top-N report generation.
//!
//! Reports are delimited text: a header line followed by one
//! `value<d>count<d>percentage` line per ranked entry. Only a finished
//! [`Counter`](tally_model::Counter) is needed; nothing here knows about
//! input files or aggregation.

mod error;
mod rank;
mod writer;

pub use error::{ReportError, Result};
pub use rank::{format_percentage, rank};
pub use writer::{render_report, write_report};
