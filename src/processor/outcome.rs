use std::fmt;

use serde::{Deserialize, Serialize};

use super::ProcessError;

/// A file that failed, with the message shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    /// File name (`archive.zip/entry.sdf` for archive entries)
    pub file: String,
    /// Error message
    pub error: String,
}

impl FileFailure {
    /// Record `error` against `file`
    pub fn new(file: impl Into<String>, error: &ProcessError) -> Self {
        Self {
            file: file.into(),
            error: error.to_string(),
        }
    }
}

impl fmt::Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file, self.error)
    }
}

/// Annotated records produced from one input file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedFile {
    /// Number of records written to `content`
    pub record_count: usize,
    /// Annotated, delimiter-terminated records
    pub content: String,
    /// Failed archive entries; always empty for plain structure files
    pub inner_failures: Vec<FileFailure>,
}

impl ProcessedFile {
    /// Append another file's records and failures after this one's
    pub fn absorb(&mut self, other: ProcessedFile) {
        self.record_count += other.record_count;
        self.content.push_str(&other.content);
        self.inner_failures.extend(other.inner_failures);
    }
}

/// Result of processing one input file
#[derive(Debug)]
pub enum FileOutcome {
    /// The file was read; its records are ready to merge
    Success(ProcessedFile),
    /// The file failed as a whole; nothing of it is merged
    Failure(ProcessError),
}

impl FileOutcome {
    /// True for [`FileOutcome::Success`]
    pub fn is_success(&self) -> bool {
        matches!(self, FileOutcome::Success(_))
    }

    /// Records produced (zero on failure)
    pub fn record_count(&self) -> usize {
        match self {
            FileOutcome::Success(processed) => processed.record_count,
            FileOutcome::Failure(_) => 0,
        }
    }
}

impl From<Result<ProcessedFile, ProcessError>> for FileOutcome {
    fn from(result: Result<ProcessedFile, ProcessError>) -> Self {
        match result {
            Ok(processed) => FileOutcome::Success(processed),
            Err(error) => FileOutcome::Failure(error),
        }
    }
}
