//! CLI argument definitions for the tally counter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Count column values across delimited files and report the top entries",
    long_about = "Count column values across delimited files and report the top entries.\n\n\
                  Column names may differ between files: a run profile maps each logical\n\
                  column to the header spellings used by different years of data.\n\
                  Without a profile the built-in H1B profile is used."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Count values in the input files and write top-N reports.
    Count(CountArgs),

    /// Print the built-in H1B run profile as JSON.
    Profile,
}

#[derive(Parser)]
pub struct CountArgs {
    /// Input file, or a directory whose csv/txt/tsv files are all read.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory for report files (default: ./output, created if missing).
    ///
    /// An explicitly given directory must already exist.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// JSON run profile with aliases, constraints and reports.
    #[arg(long = "profile", value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Override the profile's input field delimiter.
    #[arg(long = "input-delimiter", value_name = "CHAR")]
    pub input_delimiter: Option<char>,

    /// Override the profile's input encoding (e.g. utf-8, windows-1252).
    #[arg(long = "encoding", value_name = "LABEL")]
    pub encoding: Option<String>,

    /// Keep value casing instead of folding to upper case.
    #[arg(long = "preserve-case")]
    pub preserve_case: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
