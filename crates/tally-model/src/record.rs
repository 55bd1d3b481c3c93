//! Normalized data rows keyed by logical column.

use std::sync::Arc;

/// Column layout shared by every record of one file.
///
/// `columns[i]` is the logical name and `headers[i]` the header spelling it
/// was resolved to in that file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    columns: Vec<String>,
    headers: Vec<String>,
}

impl RecordSchema {
    /// Builds a schema from `(logical, header)` pairs.
    pub fn new(resolved: Vec<(String, String)>) -> Self {
        let (columns, headers) = resolved.into_iter().unzip();
        Self { columns, headers }
    }

    /// Logical column names in record order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Header name a logical column resolved to.
    pub fn header_for(&self, column: &str) -> Option<&str> {
        self.position(column)
            .map(|index| self.headers[index].as_str())
    }

    /// Position of a logical column within each record.
    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// One data row reduced to the requested logical columns.
///
/// Values are positional against the shared [`RecordSchema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    schema: Arc<RecordSchema>,
    values: Vec<String>,
    row: u64,
}

impl Record {
    /// Creates a record for 1-based data row `row`.
    ///
    /// `values` must have one entry per schema column.
    pub fn new(schema: Arc<RecordSchema>, values: Vec<String>, row: u64) -> Self {
        debug_assert_eq!(schema.len(), values.len());
        Self {
            schema,
            values,
            row,
        }
    }

    /// Cleaned value of a logical column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.schema.position(column).map(|index| self.value(index))
    }

    /// Cleaned value at a schema position.
    pub fn value(&self, index: usize) -> &str {
        &self.values[index]
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn columns(&self) -> &[String] {
        self.schema.columns()
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// 1-based data row number (the header is row 0).
    pub fn row(&self) -> u64 {
        self.row
    }
}
