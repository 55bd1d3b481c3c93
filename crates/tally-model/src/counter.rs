//! Per-value frequency counters.

use std::collections::BTreeMap;

use serde::Serialize;

/// Frequency tally for one logical column.
///
/// Every call to [`Counter::increment`] bumps both the value's count and the
/// running total, so the counts always sum to the total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Counter {
    counts: BTreeMap<String, u64>,
    total: u64,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one contributing record with `value` in the counted column.
    pub fn increment(&mut self, value: &str) {
        match self.counts.get_mut(value) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(value.to_string(), 1);
            }
        }
        self.total += 1;
    }

    /// Count for `value`, zero when never seen.
    pub fn count(&self, value: &str) -> u64 {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Number of contributing records.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct values seen.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Iterates over `(value, count)` pairs in value order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts
            .iter()
            .map(|(value, count)| (value.as_str(), *count))
    }

    /// Share of the total held by `value`, in `[0, 1]`.
    pub fn fraction(&self, value: &str) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(value) as f64 / self.total as f64
        }
    }

    /// Share of the total held by `value`, in percent.
    pub fn percentage(&self, value: &str) -> f64 {
        self.fraction(value) * 100.0
    }
}

/// One ranked row of a top-N listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopEntry {
    pub value: String,
    pub count: u64,
    pub percentage: f64,
}
