//! Constrained value counting across many files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tally_ingest::{RowSource, SourceOptions};
use tally_model::{AliasTable, Constraint, Counter, Operand, Operator, Record};
use tracing::{debug, info, info_span};

use crate::error::{CountError, Result};

/// Counts column values over a fixed list of files.
///
/// Aliases, constraints and counters are registered first; [`run`](Self::run)
/// then streams every file once, in order. A record contributes to the
/// counters only when every constraint holds for it.
///
/// Counters are published only by a run that processed every file. A failed
/// run discards its partial tallies, and any registration after a run clears
/// the published counters.
#[derive(Debug)]
pub struct Aggregator {
    files: Vec<PathBuf>,
    options: SourceOptions,
    aliases: AliasTable,
    constraints: Vec<Constraint>,
    counter_columns: Vec<String>,
    counters: Option<BTreeMap<String, Counter>>,
    files_parsed: usize,
}

/// Per-run column layout: counters occupy the first positions, constraint
/// columns that are not already counted follow.
struct Plan {
    columns: Vec<String>,
    constraint_positions: Vec<usize>,
}

impl Aggregator {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self::with_options(files, SourceOptions::default())
    }

    pub fn with_options(files: Vec<PathBuf>, options: SourceOptions) -> Self {
        Self {
            files,
            options,
            aliases: AliasTable::new(),
            constraints: Vec::new(),
            counter_columns: Vec::new(),
            counters: None,
            files_parsed: 0,
        }
    }

    /// Builder form of [`add_alias`](Self::add_alias) for a whole table.
    #[must_use]
    pub fn with_aliases(mut self, aliases: &AliasTable) -> Self {
        for (logical, headers) in aliases.iter() {
            for header in headers {
                self.add_alias(logical, header.as_str());
            }
        }
        self
    }

    /// Accepts `header` as a spelling of `logical`. Duplicates are ignored.
    pub fn add_alias(&mut self, logical: impl Into<String>, header: impl Into<String>) {
        self.counters = None;
        self.aliases.add(logical, header);
    }

    /// Adds a constraint; all constraints must hold for a record to count.
    ///
    /// Text operands are cleaned like cell values so that `certified`
    /// matches a folded `CERTIFIED` cell.
    ///
    /// # Errors
    ///
    /// Returns [`CountError::InvalidConstraint`] for an ordering operator
    /// with a text operand.
    pub fn add_constraint(
        &mut self,
        logical: impl Into<String>,
        operator: Operator,
        operand: impl Into<Operand>,
    ) -> Result<()> {
        let operand = match operand.into() {
            Operand::Text(text) => Operand::Text(self.options.normalizer.clean(&text)),
            number => number,
        };
        let constraint = Constraint::new(logical, operator, operand)?;
        debug!(constraint = %constraint, "constraint registered");
        self.counters = None;
        self.constraints.push(constraint);
        Ok(())
    }

    /// Registers a counter for `logical`.
    ///
    /// # Errors
    ///
    /// Returns [`CountError::DuplicateCounter`] if one already exists.
    pub fn add_counter(&mut self, logical: impl Into<String>) -> Result<()> {
        let logical = logical.into();
        if self.counter_columns.contains(&logical) {
            return Err(CountError::DuplicateCounter { column: logical });
        }
        self.counters = None;
        self.counter_columns.push(logical);
        Ok(())
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Counted logical columns in registration order.
    pub fn counter_names(&self) -> &[String] {
        &self.counter_columns
    }

    /// Files fully processed by the current or last run.
    pub fn files_parsed(&self) -> usize {
        self.files_parsed
    }

    /// Logical columns each file must provide: counted columns, then
    /// constrained columns, without duplicates.
    pub fn required_columns(&self) -> Vec<String> {
        self.plan().columns
    }

    /// Finished counters keyed by logical column.
    ///
    /// # Errors
    ///
    /// Returns [`CountError::NotRun`] until a run has completed.
    pub fn counters(&self) -> Result<&BTreeMap<String, Counter>> {
        self.counters.as_ref().ok_or(CountError::NotRun)
    }

    /// Finished counter for one logical column, if it was registered.
    pub fn counter(&self, logical: &str) -> Result<Option<&Counter>> {
        Ok(self.counters()?.get(logical))
    }

    /// Streams every file and counts contributing records.
    ///
    /// Each run starts from empty tallies.
    ///
    /// # Errors
    ///
    /// Stops at the first file that cannot be opened or resolved, the first
    /// malformed row, and the first constraint that cannot be evaluated.
    /// Nothing is published in that case.
    pub fn run(&mut self) -> Result<&BTreeMap<String, Counter>> {
        self.counters = None;
        self.files_parsed = 0;

        let plan = self.plan();
        let mut tallies = vec![Counter::new(); self.counter_columns.len()];
        let start = Instant::now();
        let mut total_rows = 0u64;
        let mut total_contributing = 0u64;

        for path in &self.files {
            let file_span = info_span!("file", path = %path.display());
            let _file_guard = file_span.enter();

            let source = RowSource::open(path, &plan.columns, &self.aliases, &self.options)?;
            let mut rows = 0u64;
            let mut contributing = 0u64;
            for record in source {
                let record = record?;
                rows += 1;
                if !satisfies(&self.constraints, &plan.constraint_positions, &record, path)? {
                    continue;
                }
                contributing += 1;
                for (index, tally) in tallies.iter_mut().enumerate() {
                    tally.increment(record.value(index));
                }
            }

            self.files_parsed += 1;
            total_rows += rows;
            total_contributing += contributing;
            debug!(rows, contributing, "file counted");
        }

        info!(
            files = self.files_parsed,
            counters = self.counter_columns.len(),
            rows = total_rows,
            contributing = total_contributing,
            duration_ms = start.elapsed().as_millis(),
            "count complete"
        );

        let finished: BTreeMap<String, Counter> =
            self.counter_columns.iter().cloned().zip(tallies).collect();
        Ok(&*self.counters.insert(finished))
    }

    fn plan(&self) -> Plan {
        let mut columns = self.counter_columns.clone();
        let mut constraint_positions = Vec::with_capacity(self.constraints.len());
        for constraint in &self.constraints {
            let position = match columns.iter().position(|c| c == constraint.column()) {
                Some(position) => position,
                None => {
                    columns.push(constraint.column().to_string());
                    columns.len() - 1
                }
            };
            constraint_positions.push(position);
        }
        Plan {
            columns,
            constraint_positions,
        }
    }
}

fn satisfies(
    constraints: &[Constraint],
    positions: &[usize],
    record: &Record,
    path: &Path,
) -> Result<bool> {
    for (constraint, &position) in constraints.iter().zip(positions) {
        let holds = constraint
            .evaluate(record.value(position))
            .map_err(|source| CountError::Constraint {
                path: path.to_path_buf(),
                row: record.row(),
                source,
            })?;
        if !holds {
            return Ok(false);
        }
    }
    Ok(true)
}
