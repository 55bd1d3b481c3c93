//! Ranking of counter entries.

use std::cmp::Ordering;

use tally_model::{Counter, TopEntry};

/// Returns the `n` most frequent values of `counter`.
///
/// Entries are ordered by count descending, ties by value ascending, so the
/// result is the same on every call. Fewer than `n` entries are returned
/// when the counter has fewer distinct values.
pub fn rank(counter: &Counter, n: usize) -> Vec<TopEntry> {
    let mut entries: Vec<(&str, u64)> = counter.iter().collect();
    entries.sort_by(|a, b| match b.1.cmp(&a.1) {
        Ordering::Equal => a.0.cmp(b.0),
        other => other,
    });
    entries
        .into_iter()
        .take(n)
        .map(|(value, count)| TopEntry {
            value: value.to_string(),
            count,
            percentage: counter.percentage(value),
        })
        .collect()
}

/// Formats a percentage with one decimal place and no `%` sign.
pub fn format_percentage(percentage: f64) -> String {
    format!("{percentage:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn counter(values: &[&str]) -> Counter {
        let mut counter = Counter::new();
        for value in values {
            counter.increment(value);
        }
        counter
    }

    #[test]
    fn test_orders_by_count_then_value() {
        let counter = counter(&["TX", "CA", "NY", "CA", "NY", "WA"]);
        let ranked = rank(&counter, 10);
        let values: Vec<&str> = ranked.iter().map(|entry| entry.value.as_str()).collect();
        assert_eq!(values, vec!["CA", "NY", "TX", "WA"]);
        assert_eq!(ranked[0].count, 2);
    }

    #[test]
    fn test_truncates_to_n() {
        let counter = counter(&["A", "B", "C", "C"]);
        let ranked = rank(&counter, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].value, "C");
        assert_eq!(ranked[1].value, "A");
    }

    #[test]
    fn test_empty_counter() {
        assert!(rank(&Counter::new(), 10).is_empty());
        assert!(rank(&counter(&["A"]), 0).is_empty());
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(200.0 / 3.0), "66.7");
        assert_eq!(format_percentage(100.0 / 3.0), "33.3");
        assert_eq!(format_percentage(100.0), "100.0");
        assert_eq!(format_percentage(0.0), "0.0");
    }

    proptest! {
        #[test]
        fn prop_rank_is_sorted_and_stable(
            values in proptest::collection::vec("[a-e]", 0..100),
            n in 0..8usize,
        ) {
            let mut counter = Counter::new();
            for value in &values {
                counter.increment(value);
            }
            let first = rank(&counter, n);
            prop_assert_eq!(&first, &rank(&counter, n));
            prop_assert_eq!(first.len(), n.min(counter.distinct()));
            for pair in first.windows(2) {
                let ordered = pair[0].count > pair[1].count
                    || (pair[0].count == pair[1].count && pair[0].value < pair[1].value);
                prop_assert!(ordered);
            }
        }
    }
}
