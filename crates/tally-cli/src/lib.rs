//! CLI library components for the tally counter.

pub mod logging;
pub mod pipeline;
pub mod profile;
