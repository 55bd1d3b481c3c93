//! Header alias resolution.

use std::path::Path;
use std::sync::Arc;

use tally_model::{AliasTable, RecordSchema};

use crate::error::{IngestError, Result};

/// Logical columns resolved against one file's header row.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedColumns {
    pub schema: Arc<RecordSchema>,
    /// Header position of each logical column, in schema order.
    pub indices: Vec<usize>,
}

/// Finds the header position for `logical`.
///
/// A header spelled exactly like the logical name wins. Otherwise the first
/// header, in file order, equal to a registered alias is used. Matching is
/// literal and case sensitive.
pub fn resolve_column(headers: &[String], logical: &str, aliases: &AliasTable) -> Option<usize> {
    headers
        .iter()
        .position(|header| header == logical)
        .or_else(|| {
            headers
                .iter()
                .position(|header| aliases.matches(logical, header))
        })
}

pub(crate) fn resolve_columns(
    path: &Path,
    headers: &[String],
    columns: &[String],
    aliases: &AliasTable,
) -> Result<ResolvedColumns> {
    let mut resolved = Vec::with_capacity(columns.len());
    let mut indices = Vec::with_capacity(columns.len());
    for column in columns {
        let Some(index) = resolve_column(headers, column, aliases) else {
            let mut candidates = vec![column.clone()];
            candidates.extend(aliases.aliases(column).iter().cloned());
            return Err(IngestError::ColumnResolution {
                path: path.to_path_buf(),
                column: column.clone(),
                candidates,
            });
        };
        resolved.push((column.clone(), headers[index].clone()));
        indices.push(index);
    }
    Ok(ResolvedColumns {
        schema: Arc::new(RecordSchema::new(resolved)),
        indices,
    })
}
