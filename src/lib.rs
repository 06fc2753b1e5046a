//! # sdfmerge - Provenance-Annotated SDF Merging
//!
//! `sdfmerge` combines chemical structure files into one SD file. Every
//! record of the output carries two extra data fields: `SOURCE_FILE`, naming
//! the file it came from, and `MERGE_TIMESTAMP`, identifying the merge run.
//!
//! ## Key Features
//!
//! - **Record-level merging**: `.sdf` files are split on their `$$$$`
//!   delimiter lines; `.mol` files contribute one record each.
//!
//! - **Archive expansion**: `.zip` archives are opened and their structure
//!   files merged in place, named `archive.zip/entry.sdf`.
//!
//! - **Failure isolation**: a file that cannot be read or decoded is listed in
//!   the result and skipped; the rest of the batch is still merged.
//!
//! - **Order preservation**: files are read ahead on a small thread pool, but
//!   records always appear in input order.
//!
//! ## Quick Start
//!
//! ```rust
//! use sdfmerge::prelude::*;
//!
//! let mut batch = InputBatch::new();
//! batch.add(InputFile::from_bytes("A.sdf", "mol1\nM  END\n$$$$\nmol2\nM  END\n$$$$\n")?)?;
//! batch.add(InputFile::from_bytes("B.mol", "mol3\nM  END\n")?)?;
//!
//! let result = Merger::new().merge(batch.files())?;
//! assert_eq!(result.total_records(), 3);
//!
//! let report = validate_merged(result.file_name(), result.content());
//! assert!(report.is_valid());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`record`]: splitting, annotation, and data-field parsing
//! - [`provenance`]: run timestamps and per-record stamps
//! - [`input`]: input files, kinds, and batches
//! - [`archive`]: archive expansion
//! - [`processor`]: one file in, annotated records out
//! - [`merge`]: the merge run, progress, and results
//! - [`validator`]: checks for merged files

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod archive;
pub mod input;
pub mod merge;
pub mod processor;
pub mod provenance;
pub mod record;
pub mod validator;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::input::{FileKind, InputBatch, InputError, InputFile};
    pub use crate::merge::{
        CancellationToken, MergeError, MergeResult, MergeStage, MergeSummary, Merger, MergerConfig,
        ProgressEvent, ProgressObserver,
    };
    pub use crate::processor::{FileFailure, FileOutcome, FileProcessor, ProcessError};
    pub use crate::provenance::{ProvenanceStamp, RunTimestamp};
    pub use crate::record::{annotate, count_records, split, RecordBlock};
    pub use crate::validator::{validate_merged, validate_merged_file, ValidationReport};
}
