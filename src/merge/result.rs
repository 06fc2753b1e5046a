use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::input::FileKind;
use crate::processor::FileFailure;
use crate::provenance::RunTimestamp;

/// Per-file line of a merge result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    /// Input file name
    pub file: String,
    /// Declared kind
    pub kind: FileKind,
    /// Modification time of the input, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    /// Records merged from the file (archives: across all entries)
    pub records: usize,
    /// Error message if the file failed as a whole
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of a merge run. Read-only for the caller.
#[derive(Debug, Clone)]
pub struct MergeResult {
    pub(super) total_records: usize,
    pub(super) content: String,
    pub(super) failures: Vec<FileFailure>,
    pub(super) files: Vec<FileSummary>,
    pub(super) file_name: String,
    pub(super) run: RunTimestamp,
    pub(super) cancelled: bool,
}

impl MergeResult {
    /// Records in the merged output
    pub fn total_records(&self) -> usize {
        self.total_records
    }

    /// Merged SDF text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Merged SDF as bytes
    pub fn bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }

    /// Size of the merged output in bytes
    pub fn byte_len(&self) -> usize {
        self.content.len()
    }

    /// Take ownership of the merged bytes
    pub fn into_bytes(self) -> Bytes {
        Bytes::from(self.content.into_bytes())
    }

    /// Failed files and archive entries, in input order
    pub fn failures(&self) -> &[FileFailure] {
        &self.failures
    }

    /// One line per input file reached before the run ended, in input order
    pub fn files(&self) -> &[FileSummary] {
        &self.files
    }

    /// Generated output file name (`merged_sdf_YYYY-MM-DD-HH-MM-SS.sdf`)
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Timestamp shared by every record of this run
    pub fn run(&self) -> RunTimestamp {
        self.run
    }

    /// True if the run was cancelled before all files were merged
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// True if any file or archive entry failed
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Serializable summary of this result
    pub fn summary(&self) -> MergeSummary {
        MergeSummary {
            output_file: self.file_name.clone(),
            started_at: self.run.datetime(),
            total_records: self.total_records,
            output_bytes: self.content.len() as u64,
            files_processed: self.files.iter().filter(|f| f.error.is_none()).count(),
            files_failed: self.files.iter().filter(|f| f.error.is_some()).count(),
            cancelled: self.cancelled,
            files: self.files.clone(),
            failures: self.failures.clone(),
        }
    }
}

/// Summary of a merge run, as printed by the CLI and written with
/// `--summary-json`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeSummary {
    /// Generated output file name
    pub output_file: String,
    /// Run start time
    pub started_at: DateTime<Utc>,
    /// Records in the merged output
    pub total_records: usize,
    /// Size of the merged output
    pub output_bytes: u64,
    /// Input files merged without a whole-file failure
    pub files_processed: usize,
    /// Input files that failed as a whole
    pub files_failed: usize,
    /// Whether the run was cancelled
    pub cancelled: bool,
    /// Per-file lines
    pub files: Vec<FileSummary>,
    /// Failed files and archive entries
    pub failures: Vec<FileFailure>,
}

impl fmt::Display for MergeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Merge: {} files processed, {} failed, {} molecules, {} bytes -> {}",
            self.files_processed, self.files_failed, self.total_records, self.output_bytes, self.output_file
        )?;
        if self.cancelled {
            write!(f, " (cancelled)")?;
        }
        Ok(())
    }
}
