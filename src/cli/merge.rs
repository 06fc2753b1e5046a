use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use sdfmerge::merge::{CancellationToken, MergeStage, Merger, ProgressEvent};
use sdfmerge::provenance::RunTimestamp;

use super::config::Config;
use super::inputs;

/// Arguments of the merge command
pub struct MergeArgs {
    pub inputs: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub jobs: Option<usize>,
    pub no_expand_archives: bool,
    pub summary_json: Option<PathBuf>,
}

/// Merge the inputs and write the result next to them or where requested
pub fn run(args: MergeArgs) -> Result<()> {
    let file_config = Config::load(args.config.as_deref())?;

    let mut config = file_config.merger_config();
    if let Some(jobs) = args.jobs {
        config = config.with_read_concurrency(jobs);
    }
    if args.no_expand_archives {
        config = config.with_expand_archives(false);
    }

    let batch = inputs::collect(&args.inputs)?;
    if batch.is_empty() {
        bail!("No supported input files (.sdf, .mol, .zip) found");
    }

    info!("sdfmerge - merging {} files ({} bytes)", batch.len(), batch.total_size());
    info!("Read threads: {}", config.read_concurrency);
    info!(
        "Archives: {}",
        if config.expand_archives { "expanded" } else { "placeholder record" }
    );

    let observer = |event: &ProgressEvent| match &event.stage {
        MergeStage::Merged { records } => info!(
            "[{}/{}] {}: {} records",
            event.index + 1,
            event.total,
            event.file,
            records
        ),
        MergeStage::Failed { error } => {
            warn!("[{}/{}] {}: {}", event.index + 1, event.total, event.file, error)
        }
        stage => debug!("[{}/{}] {}: {:?}", event.index + 1, event.total, event.file, stage),
    };

    let merger = Merger::with_config(config);
    let result = merger.merge_with(batch.files(), RunTimestamp::now(), &observer, &CancellationToken::new())?;

    // An explicit --output may be replaced; a generated name never is
    let (output, overwrite) = match args.output {
        Some(path) => (path, true),
        None => (
            args.output_dir
                .or(file_config.merge.output_dir)
                .unwrap_or_else(|| PathBuf::from("."))
                .join(result.file_name()),
            false,
        ),
    };
    write_atomic(&output, result.bytes(), overwrite)?;

    let summary = result.summary();
    println!("{}", summary);
    println!("Output: {}", output.display());
    for failure in &summary.failures {
        println!("  failed: {}", failure);
    }

    if let Some(path) = args.summary_json {
        let json = serde_json::to_string_pretty(&summary)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write summary: {}", path.display()))?;
        info!("Summary written to {}", path.display());
    }

    Ok(())
}

/// Write `bytes` to a temporary file beside `path`, then rename it into place.
///
/// Without `overwrite`, an existing file at `path` is an error and is left
/// untouched.
fn write_atomic(path: &Path, bytes: &[u8], overwrite: bool) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(bytes).context("Failed to write merged output")?;
    if overwrite {
        tmp.persist(path)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    } else {
        tmp.persist_noclobber(path).map_err(|e| {
            if e.error.kind() == std::io::ErrorKind::AlreadyExists {
                anyhow::anyhow!(
                    "Output file already exists: {} (pass --output to replace it)",
                    path.display()
                )
            } else {
                anyhow::Error::new(e).context(format!("Failed to write output file: {}", path.display()))
            }
        })?;
    }

    Ok(())
}
