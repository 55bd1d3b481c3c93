use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;

use tally_cli::pipeline::{CountOptions, CountOutcome, count};
use tally_cli::profile::RunProfile;
use tally_ingest::CaseFold;

use crate::cli::CountArgs;

/// Default report directory, relative to the working directory.
const DEFAULT_OUTPUT_DIR: &str = "output";

pub fn run_profile() -> Result<()> {
    println!("{}", RunProfile::h1b().to_json()?);
    Ok(())
}

pub fn run_count(args: &CountArgs) -> Result<CountOutcome> {
    let mut profile = match &args.profile {
        Some(path) => RunProfile::load(path)?,
        None => RunProfile::h1b(),
    };
    if let Some(delimiter) = args.input_delimiter {
        profile.input_delimiter = delimiter;
    }
    if let Some(encoding) = &args.encoding {
        profile.input_encoding = encoding.clone();
    }

    let output_dir = prepare_output_dir(args.output_dir.as_deref())?;
    debug!(output_dir = %output_dir.display(), "output directory ready");

    let options = CountOptions {
        case_fold: if args.preserve_case {
            CaseFold::Preserve
        } else {
            CaseFold::Upper
        },
    };
    count(&args.input, &output_dir, &profile, options)
}

/// Returns the report directory. Only the default directory is created.
fn prepare_output_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(dir) => {
            if !dir.is_dir() {
                bail!("output directory does not exist: {}", dir.display());
            }
            Ok(dir.to_path_buf())
        }
        None => {
            let dir = PathBuf::from(DEFAULT_OUTPUT_DIR);
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("create output directory {}", dir.display()))?;
            Ok(dir)
        }
    }
}
