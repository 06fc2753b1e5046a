use anyhow::Result;
use log::info;
use std::path::PathBuf;

use sdfmerge::validator::validate_merged_file;

/// Validate a merged SDF file
pub fn run(file: PathBuf) -> Result<()> {
    info!("Validating {}", file.display());

    match validate_merged_file(&file) {
        Ok(report) => {
            println!("{}", report.format_colored());

            if report.has_failures() {
                std::process::exit(1);
            }

            Ok(())
        }
        Err(e) => {
            eprintln!("Validation error: {}", e);
            std::process::exit(1);
        }
    }
}
