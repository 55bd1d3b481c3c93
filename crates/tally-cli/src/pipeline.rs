//! Count pipeline: discover inputs, aggregate, write reports.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use tally_core::Aggregator;
use tally_ingest::{CaseFold, Encoding, Normalizer, SourceOptions, resolve_inputs};
use tally_model::TopEntry;
use tally_report::{rank, write_report};

use crate::profile::RunProfile;

/// Settings that come from the command line rather than the profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountOptions {
    pub case_fold: CaseFold,
}

/// One report file produced by a run.
#[derive(Debug, Clone)]
pub struct WrittenReport {
    pub column: String,
    pub path: PathBuf,
    pub entries: usize,
    pub total: u64,
    pub leader: Option<TopEntry>,
}

/// Result of a successful count run.
#[derive(Debug, Clone)]
pub struct CountOutcome {
    pub input_files: Vec<PathBuf>,
    pub reports: Vec<WrittenReport>,
}

/// Builds reader options from a profile.
pub fn source_options(profile: &RunProfile, options: CountOptions) -> Result<SourceOptions> {
    let encoding = Encoding::for_label(profile.input_encoding.trim().as_bytes())
        .ok_or_else(|| anyhow!("unknown input encoding '{}'", profile.input_encoding))?;
    Ok(SourceOptions::default()
        .with_delimiter(profile.input_delimiter_byte()?)
        .with_normalizer(Normalizer::new(encoding, options.case_fold)))
}

/// Runs `profile` over `input` and writes every report into `output_dir`.
///
/// No report is written unless every input file was counted.
pub fn count(
    input: &Path,
    output_dir: &Path,
    profile: &RunProfile,
    options: CountOptions,
) -> Result<CountOutcome> {
    profile.validate()?;
    let source_options = source_options(profile, options)?;

    let files = resolve_inputs(input).with_context(|| format!("read input {}", input.display()))?;
    let count_span = info_span!("count", input = %input.display(), files = files.len());
    let _count_guard = count_span.enter();

    let mut aggregator =
        Aggregator::with_options(files.clone(), source_options).with_aliases(&profile.aliases);
    for spec in &profile.constraints {
        aggregator
            .add_constraint(spec.column.as_str(), spec.operator, spec.value.clone())
            .with_context(|| format!("constraint on '{}'", spec.column))?;
    }
    for column in profile.counter_columns() {
        aggregator.add_counter(column)?;
    }

    let counters = aggregator.run().context("count input files")?;

    let mut reports = Vec::with_capacity(profile.reports.len());
    for spec in &profile.reports {
        let counter = counters
            .get(&spec.column)
            .ok_or_else(|| anyhow!("no counter for column '{}'", spec.column))?;
        let path = output_dir.join(&spec.file);
        let delimiter = spec.delimiter_byte()?;
        let entries = write_report(&path, &spec.header, counter, spec.top, delimiter)
            .with_context(|| format!("write report for '{}'", spec.column))?;
        reports.push(WrittenReport {
            column: spec.column.clone(),
            path,
            entries,
            total: counter.total(),
            leader: rank(counter, 1).into_iter().next(),
        });
    }

    info!(reports = reports.len(), "run complete");
    Ok(CountOutcome {
        input_files: files,
        reports,
    })
}
