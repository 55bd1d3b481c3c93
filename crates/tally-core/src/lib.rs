//! Multi-file counting engine.
//!
//! [`Aggregator`] owns the alias table, constraints and counters of one
//! counting run. It opens a [`RowSource`](tally_ingest::RowSource) per input
//! file, scoped to exactly the logical columns the counters and constraints
//! need, and tallies every record that satisfies all constraints.
//!
//! # Example
//!
//! ```ignore
//! use tally_core::Aggregator;
//! use tally_model::Operator;
//!
//! let mut aggregator = Aggregator::new(files);
//! aggregator.add_alias("state", "WORKSITE_STATE");
//! aggregator.add_constraint("status", Operator::Equals, "certified")?;
//! aggregator.add_counter("state")?;
//! let counters = aggregator.run()?;
//! ```

mod aggregator;
mod error;

pub use aggregator::Aggregator;
pub use error::{CountError, Result};
