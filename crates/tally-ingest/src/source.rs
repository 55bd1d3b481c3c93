//! Streaming row source over one delimited file.

use std::fs::File;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use csv::{ByteRecord, Reader, ReaderBuilder};
use tally_model::{AliasTable, Record, RecordSchema};

use crate::error::{IngestError, Result};
use crate::header::resolve_columns;
use crate::normalize::Normalizer;

/// Reader configuration for input files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Field decoding and cleaning.
    pub normalizer: Normalizer,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            normalizer: Normalizer::default(),
        }
    }
}

impl SourceOptions {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }
}

/// Lazy, forward-only sequence of normalized records from one file.
///
/// The file handle is owned by the source and closed when the source is
/// dropped, whether it was exhausted, failed, or abandoned early. After the
/// first error the source yields nothing further.
pub struct RowSource {
    path: PathBuf,
    reader: Reader<File>,
    schema: Arc<RecordSchema>,
    indices: Vec<usize>,
    width: usize,
    normalizer: Normalizer,
    record: ByteRecord,
    row: u64,
    finished: bool,
}

impl RowSource {
    /// Opens `path`, reads its header row and resolves `columns` against it.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened, has no header row, or a logical
    /// column cannot be matched to any header.
    pub fn open(
        path: &Path,
        columns: &[String],
        aliases: &AliasTable,
        options: &SourceOptions,
    ) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IngestError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                IngestError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let mut reader = ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let header_record = reader
            .byte_headers()
            .map_err(|e| csv_error(path, 0, &e))?
            .clone();
        if header_record.is_empty() {
            return Err(IngestError::EmptyFile {
                path: path.to_path_buf(),
            });
        }

        let normalizer = options.normalizer;
        let headers: Vec<String> = header_record
            .iter()
            .map(|field| normalizer.header(field))
            .collect();
        let resolved = resolve_columns(path, &headers, columns, aliases)?;

        let mapping: Vec<String> = resolved
            .schema
            .columns()
            .iter()
            .zip(&resolved.indices)
            .map(|(column, &index)| format!("{column}={}", headers[index]))
            .collect();
        tracing::debug!(
            path = %path.display(),
            header_count = headers.len(),
            mapping = %mapping.join(", "),
            "resolved columns"
        );

        Ok(Self {
            path: path.to_path_buf(),
            reader,
            schema: resolved.schema,
            indices: resolved.indices,
            width: headers.len(),
            normalizer,
            record: ByteRecord::new(),
            row: 0,
            finished: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Column layout of the records this source yields.
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Number of data rows read so far.
    pub fn rows_read(&self) -> u64 {
        self.row
    }

    fn read_next(&mut self) -> Result<Option<Record>> {
        let more = self
            .reader
            .read_byte_record(&mut self.record)
            .map_err(|e| csv_error(&self.path, self.row + 1, &e))?;
        if !more {
            return Ok(None);
        }
        self.row += 1;

        if self.record.len() != self.width {
            return Err(IngestError::MalformedRow {
                path: self.path.clone(),
                row: self.row,
                expected: self.width,
                found: self.record.len(),
            });
        }

        let values = self
            .indices
            .iter()
            .map(|&index| self.normalizer.normalize(&self.record[index]))
            .collect();
        Ok(Some(Record::new(Arc::clone(&self.schema), values, self.row)))
    }
}

impl Iterator for RowSource {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_next() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}

impl FusedIterator for RowSource {}

fn csv_error(path: &Path, row: u64, error: &csv::Error) -> IngestError {
    IngestError::Csv {
        path: path.to_path_buf(),
        row,
        message: error.to_string(),
    }
}
