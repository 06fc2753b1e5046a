use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod count;
mod inputs;
mod merge;
mod validate;

/// sdfmerge - Merge SDF and MOL files into one annotated SDF
#[derive(Parser)]
#[command(name = "sdfmerge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge structure files and archives into one SDF file
    Merge {
        /// Input files (.sdf, .mol, .zip) or directories
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Directory for the generated merged_sdf_<timestamp>.sdf
        #[arg(short = 'd', long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Exact output path (overrides --output-dir)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Number of threads reading input files
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Emit one placeholder record per archive instead of expanding it
        #[arg(long)]
        no_expand_archives: bool,

        /// Write the merge summary as JSON
        #[arg(long, value_name = "FILE")]
        summary_json: Option<PathBuf>,
    },

    /// Count records per input file without merging
    Count {
        /// Input files (.sdf, .mol, .zip) or directories
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Count one placeholder record per archive instead of expanding it
        #[arg(long)]
        no_expand_archives: bool,
    },

    /// Validate a merged SDF file
    Validate {
        /// Merged SDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Merge {
            inputs,
            output_dir,
            output,
            config,
            jobs,
            no_expand_archives,
            summary_json,
        } => merge::run(merge::MergeArgs {
            inputs,
            output_dir,
            output,
            config,
            jobs,
            no_expand_archives,
            summary_json,
        }),
        Commands::Count {
            inputs,
            config,
            no_expand_archives,
        } => count::run(count::CountArgs {
            inputs,
            config,
            no_expand_archives,
        }),
        Commands::Validate { file } => validate::run(file),
    }
}
