//! # sdfmerge
//!
//! Command-line tool for merging SDF and MOL files into one SDF file in
//! which every record names its source file and the merge run.
//!
//! ## Usage
//!
//! ```bash
//! # Merge files and directories into merged_sdf_<timestamp>.sdf
//! sdfmerge merge ligands/ extra.sdf decoys.zip
//!
//! # Count records per file
//! sdfmerge count ligands/
//!
//! # Check a merged file
//! sdfmerge validate merged_sdf_2024-01-15-10-30-00.sdf
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
