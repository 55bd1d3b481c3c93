//! Logical column aliases.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Maps a logical column name to the literal header names accepted for it.
///
/// Aliases keep their registration order. A logical name without aliases is
/// matched literally against the file header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl AliasTable {
    /// Creates an empty alias table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `header` as an accepted spelling of `logical`.
    ///
    /// Registering the same pair twice has no effect.
    pub fn add(&mut self, logical: impl Into<String>, header: impl Into<String>) {
        let header = header.into();
        let headers = self.entries.entry(logical.into()).or_default();
        if !headers.contains(&header) {
            headers.push(header);
        }
    }

    /// Returns the aliases registered for `logical`, in registration order.
    pub fn aliases(&self, logical: &str) -> &[String] {
        self.entries
            .get(logical)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns true if `header` is a registered alias of `logical`.
    pub fn matches(&self, logical: &str, header: &str) -> bool {
        self.aliases(logical).iter().any(|alias| alias == header)
    }

    /// Iterates over logical names and their aliases.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(logical, headers)| (logical.as_str(), headers.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<L, I> FromIterator<(L, I)> for AliasTable
where
    L: Into<String>,
    I: IntoIterator,
    I::Item: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (L, I)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (logical, headers) in iter {
            let logical = logical.into();
            for header in headers {
                table.add(logical.clone(), header);
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_idempotent() {
        let mut table = AliasTable::new();
        table.add("state", "STATE");
        table.add("state", "STATE");
        table.add("state", "RGN");
        assert_eq!(table.aliases("state"), ["STATE", "RGN"]);
    }

    #[test]
    fn test_unknown_logical_has_no_aliases() {
        let table = AliasTable::new();
        assert!(table.aliases("state").is_empty());
        assert!(!table.matches("state", "state"));
    }

    #[test]
    fn test_from_iter() {
        let table: AliasTable = [
            ("status", vec!["STATUS", "CASE_STATUS"]),
            ("state", vec!["WORKSITE_STATE"]),
        ]
        .into_iter()
        .collect();
        assert_eq!(table.len(), 2);
        assert!(table.matches("status", "CASE_STATUS"));
        assert!(!table.matches("state", "CASE_STATUS"));
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut table = AliasTable::new();
        table.add("state", "STATE");
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"state":["STATE"]}"#);
    }
}
