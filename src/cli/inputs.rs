use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;

use sdfmerge::input::{InputBatch, InputError};

/// Build a batch from command-line paths. Directories contribute their
/// supported files in name order; unsupported and duplicate files are skipped.
pub fn collect(paths: &[PathBuf]) -> Result<InputBatch> {
    let mut batch = InputBatch::new();

    for path in paths {
        if path.is_dir() {
            let added = batch
                .add_directory(path)
                .with_context(|| format!("Failed to scan directory: {}", path.display()))?;
            info!("{}: {} input files", path.display(), added);
            continue;
        }

        match batch.add_path(path) {
            Ok(()) => {}
            Err(e @ (InputError::UnsupportedKind { .. } | InputError::Duplicate { .. })) => {
                warn!("Skipping {}: {}", path.display(), e);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to add input: {}", path.display()));
            }
        }
    }

    Ok(batch)
}
