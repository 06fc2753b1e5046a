use anyhow::{bail, Result};
use log::info;
use std::path::PathBuf;

use sdfmerge::input::InputFile;
use sdfmerge::merge::MergerConfig;
use sdfmerge::processor::{FileOutcome, FileProcessor};

use super::config::Config;
use super::inputs;

/// Arguments of the count command
pub struct CountArgs {
    pub inputs: Vec<PathBuf>,
    pub config: Option<PathBuf>,
    pub no_expand_archives: bool,
}

/// Print the record count of each input file
pub fn run(args: CountArgs) -> Result<()> {
    let config = count_config(Config::load(args.config.as_deref())?, args.no_expand_archives);

    let batch = inputs::collect(&args.inputs)?;
    if batch.is_empty() {
        bail!("No supported input files (.sdf, .mol, .zip) found");
    }
    info!(
        "Archives: {}",
        if config.expand_archives { "expanded" } else { "placeholder record" }
    );

    let counts = count_files(&config.processor(), batch.files());
    let width = batch.files().iter().map(|f| f.name().len()).max().unwrap_or(0);
    let mut total = 0;
    let mut failed = 0;

    for (file, outcome) in batch.files().iter().zip(&counts) {
        match outcome {
            FileOutcome::Success(counted) => {
                total += counted.record_count;
                println!("{:<width$}  {:>8}", file.name(), counted.record_count);
                for failure in &counted.inner_failures {
                    println!("  skipped {}", failure);
                }
            }
            FileOutcome::Failure(e) => {
                failed += 1;
                println!("{:<width$}  {:>8}  ({})", file.name(), "-", e);
            }
        }
    }

    println!();
    println!(
        "{} files, {} molecules{}",
        batch.len(),
        total,
        if failed > 0 { format!(", {} failed", failed) } else { String::new() }
    );

    Ok(())
}

/// Merger settings from the config file with command-line flags applied
fn count_config(file_config: Config, no_expand_archives: bool) -> MergerConfig {
    let config = file_config.merger_config();
    if no_expand_archives {
        config.with_expand_archives(false)
    } else {
        config
    }
}

fn count_files(processor: &FileProcessor, files: &[InputFile]) -> Vec<FileOutcome> {
    files.iter().map(|file| processor.count(file)).collect()
}
