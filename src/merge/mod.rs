//! # Merge Module
//!
//! Orchestrates a merge run over a batch of input files.
//!
//! ## Overview
//!
//! A run takes one timestamp when it starts, then processes every file in
//! input order. Each successful file's annotated records are appended to the
//! output; a failed file is recorded and skipped. When all files are done the
//! stream is normalized to end with a delimiter line and a newline.
//!
//! Reading runs ahead of processing on a small pool of threads
//! ([`MergerConfig::read_concurrency`]); records are always appended in
//! input order.
//!
//! ## Example
//!
//! ```rust
//! use sdfmerge::input::InputFile;
//! use sdfmerge::merge::Merger;
//!
//! let files = vec![
//!     InputFile::from_bytes("A.sdf", "mol1\nM  END\n$$$$\nmol2\nM  END\n$$$$\n").unwrap(),
//!     InputFile::from_bytes("B.mol", "mol3\nM  END\n").unwrap(),
//! ];
//!
//! let result = Merger::new().merge(&files).unwrap();
//! assert_eq!(result.total_records(), 3);
//! assert!(result.content().ends_with("$$$$\n"));
//! assert!(result.file_name().starts_with("merged_sdf_"));
//! ```

mod config;
mod error;
mod merger;
mod progress;
mod read_ahead;
mod result;


pub use config::MergerConfig;
pub use error::MergeError;
pub use merger::{output_file_name, Merger, OUTPUT_FILE_PREFIX};
pub use progress::{CancellationToken, MergeStage, NoProgress, ProgressEvent, ProgressObserver};
pub use result::{FileSummary, MergeResult, MergeSummary};
