//! Delimited report output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tally_model::Counter;

use crate::error::{ReportError, Result};
use crate::rank::{format_percentage, rank};

/// Writes the header and ranked rows to `out`.
///
/// Fields containing the delimiter, a quote or a line break are quoted.
fn write_rows<W: Write, H: AsRef<str>>(
    out: W,
    header: &[H],
    counter: &Counter,
    n: usize,
    delimiter: u8,
) -> csv::Result<W> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(out);
    writer.write_record(header.iter().map(AsRef::<str>::as_ref))?;
    for entry in rank(counter, n) {
        let count = entry.count.to_string();
        let percentage = format_percentage(entry.percentage);
        writer.write_record([entry.value.as_str(), count.as_str(), percentage.as_str()])?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Renders the top `n` entries of `counter` as delimited text.
///
/// The first line is `header`; each further line is `value`, `count` and
/// `percentage`. Fields are separated by `delimiter` and quoted only when
/// they contain it. Every line ends with `\n`.
///
/// # Errors
///
/// Returns [`ReportError::Render`] if the rows cannot be encoded.
pub fn render_report<H: AsRef<str>>(
    header: &[H],
    counter: &Counter,
    n: usize,
    delimiter: u8,
) -> Result<String> {
    let render_error = |reason: String| ReportError::Render { reason };
    let bytes = write_rows(Vec::new(), header, counter, n, delimiter)
        .map_err(|e| render_error(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| render_error(e.to_string()))
}

/// Writes a top-`n` report for `counter` to `path`.
///
/// The parent directory must already exist; it is never created. Returns the
/// number of ranked entries written.
///
/// # Errors
///
/// Returns [`ReportError::Write`] if the parent directory is missing or the
/// file cannot be created or written.
pub fn write_report<H: AsRef<str>>(
    path: &Path,
    header: &[H],
    counter: &Counter,
    n: usize,
    delimiter: u8,
) -> Result<usize> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    if !parent.is_dir() {
        return Err(ReportError::Write {
            path: path.to_path_buf(),
            reason: format!("parent directory {} does not exist", parent.display()),
        });
    }

    let write_error = |reason: String| ReportError::Write {
        path: path.to_path_buf(),
        reason,
    };
    let file = File::create(path).map_err(|e| write_error(e.to_string()))?;
    let mut out = write_rows(BufWriter::new(file), header, counter, n, delimiter)
        .map_err(|e| write_error(e.to_string()))?;
    out.flush().map_err(|e| write_error(e.to_string()))?;

    let entries = n.min(counter.distinct());
    tracing::info!(
        path = %path.display(),
        entries,
        total = counter.total(),
        "report written"
    );
    Ok(entries)
}
