//! # Processor Module
//!
//! Turns the bytes of one input file into annotated records.
//!
//! ## Structure files
//!
//! Content is decoded as UTF-8 (a leading byte-order mark is dropped), split
//! into records, and every record is annotated with the file's name and the
//! run timestamp. A file without records is a success with zero records.
//!
//! ## Archives
//!
//! With an [`ArchiveExpander`] configured (the default, [`ZipExpander`]), each
//! archive entry with a structure-file extension is processed as its own file
//! under the provenance name `archive.zip/entry.sdf`. Entries of other types
//! are skipped. A failed entry is listed in the archive's
//! [`ProcessedFile::inner_failures`] while the other entries are still merged.
//!
//! With archive expansion disabled, an archive contributes one placeholder
//! record stating that its contents need external processing.
//!
//! ## Counting
//!
//! [`FileProcessor::count`] walks a file the same way but only counts records,
//! leaving [`ProcessedFile::content`] empty.

mod error;
mod outcome;

#[cfg(test)]
mod tests;

pub use error::ProcessError;
pub use outcome::{FileFailure, FileOutcome, ProcessedFile};

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};

use crate::archive::{ArchiveError, ArchiveExpander, ZipExpander};
use crate::input::{FileKind, InputFile};
use crate::provenance::{ProvenanceStamp, RunTimestamp};
use crate::record::{annotate_into, push_data_field, push_single_line, split};

/// UTF-8 byte-order mark
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Default limit for archives nested inside archives
pub const DEFAULT_MAX_ARCHIVE_DEPTH: usize = 4;

/// Comment carried by the placeholder record of an unexpanded archive
pub const ARCHIVE_PLACEHOLDER_COMMENT: &str =
    "Archive not expanded inline; its contents require external processing.";

/// What processing produces for each record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Annotated,
    CountOnly,
}

/// Processes single input files into annotated records
#[derive(Clone)]
pub struct FileProcessor {
    expander: Option<Arc<dyn ArchiveExpander>>,
    max_archive_depth: usize,
}

impl fmt::Debug for FileProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileProcessor")
            .field("expands_archives", &self.expands_archives())
            .field("max_archive_depth", &self.max_archive_depth)
            .finish()
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl FileProcessor {
    /// Processor expanding ZIP archives
    pub fn new() -> Self {
        Self::with_expander(Arc::new(ZipExpander::new()))
    }

    /// Processor expanding archives with `expander`
    pub fn with_expander(expander: Arc<dyn ArchiveExpander>) -> Self {
        Self {
            expander: Some(expander),
            max_archive_depth: DEFAULT_MAX_ARCHIVE_DEPTH,
        }
    }

    /// Processor that emits a placeholder record for each archive
    pub fn without_archive_expansion() -> Self {
        Self {
            expander: None,
            max_archive_depth: DEFAULT_MAX_ARCHIVE_DEPTH,
        }
    }

    /// Set how many levels of archives inside archives are expanded
    pub fn with_max_archive_depth(mut self, depth: usize) -> Self {
        self.max_archive_depth = depth;
        self
    }

    /// True if archives are expanded rather than replaced by a placeholder
    pub fn expands_archives(&self) -> bool {
        self.expander.is_some()
    }

    /// Read and process `file`, annotating its records with `stamp`.
    pub fn process(&self, file: &InputFile, stamp: &ProvenanceStamp) -> FileOutcome {
        match file.read() {
            Ok(bytes) => self.process_loaded(file.kind(), &bytes, stamp),
            Err(e) => FileOutcome::Failure(ProcessError::Read(e)),
        }
    }

    /// Process content that has already been read.
    pub fn process_loaded(&self, kind: FileKind, content: &[u8], stamp: &ProvenanceStamp) -> FileOutcome {
        self.process_content(kind, content, stamp, 0, Output::Annotated).into()
    }

    /// Read `file` and count the records a merge would take from it.
    ///
    /// Archives are expanded (or replaced by their placeholder) exactly as in
    /// [`process`](Self::process), so the count matches a merge with this
    /// processor. No records are annotated.
    pub fn count(&self, file: &InputFile) -> FileOutcome {
        let stamp = ProvenanceStamp::new(file.name(), &RunTimestamp::now());
        match file.read() {
            Ok(bytes) => self
                .process_content(file.kind(), &bytes, &stamp, 0, Output::CountOnly)
                .into(),
            Err(e) => FileOutcome::Failure(ProcessError::Read(e)),
        }
    }

    fn process_content(
        &self,
        kind: FileKind,
        content: &[u8],
        stamp: &ProvenanceStamp,
        depth: usize,
        output: Output,
    ) -> Result<ProcessedFile, ProcessError> {
        match kind {
            FileKind::StructureFile => self.process_structure(content, stamp, output),
            FileKind::Archive => self.process_archive(content, stamp, depth, output),
        }
    }

    fn process_structure(
        &self,
        content: &[u8],
        stamp: &ProvenanceStamp,
        output: Output,
    ) -> Result<ProcessedFile, ProcessError> {
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
        let text = std::str::from_utf8(content)?;

        let mut processed = ProcessedFile::default();
        match output {
            Output::Annotated => {
                processed.content.reserve(text.len() + text.len() / 8);
                for block in split(text) {
                    annotate_into(&mut processed.content, block, stamp);
                    processed.record_count += 1;
                }
            }
            Output::CountOnly => processed.record_count = split(text).count(),
        }

        debug!("{}: {} records", stamp.source_file(), processed.record_count);
        Ok(processed)
    }

    fn process_archive(
        &self,
        content: &[u8],
        stamp: &ProvenanceStamp,
        depth: usize,
        output: Output,
    ) -> Result<ProcessedFile, ProcessError> {
        let Some(expander) = &self.expander else {
            return Ok(match output {
                Output::Annotated => archive_placeholder(stamp),
                Output::CountOnly => ProcessedFile {
                    record_count: 1,
                    ..Default::default()
                },
            });
        };
        if depth >= self.max_archive_depth {
            return Err(ArchiveError::NestedTooDeep(self.max_archive_depth).into());
        }

        let mut processed = ProcessedFile::default();
        for entry in expander.expand(stamp.source_file(), content)? {
            let entry_stamp = stamp.for_source(format!("{}/{}", stamp.source_file(), entry.name));
            let Some(kind) = FileKind::from_name(&entry.name) else {
                debug!("{}: skipping unsupported entry", entry_stamp.source_file());
                continue;
            };

            match self.process_content(kind, &entry.content, &entry_stamp, depth + 1, output) {
                Ok(inner) => processed.absorb(inner),
                Err(e) => {
                    warn!("{}: {}", entry_stamp.source_file(), e);
                    processed
                        .inner_failures
                        .push(FileFailure::new(entry_stamp.source_file(), &e));
                }
            }
        }

        Ok(processed)
    }
}

/// One empty-molecule record standing in for an unexpanded archive.
fn archive_placeholder(stamp: &ProvenanceStamp) -> ProcessedFile {
    let mut body = String::new();
    push_single_line(&mut body, stamp.source_file());
    body.push_str("\n  sdfmerge\n\n  0  0  0  0  0  0  0  0  0  0999 V2000\nM  END\n");
    push_data_field(&mut body, "COMMENT", ARCHIVE_PLACEHOLDER_COMMENT);

    let mut processed = ProcessedFile::default();
    if let Some(block) = split(&body).next() {
        annotate_into(&mut processed.content, block, stamp);
        processed.record_count = 1;
    }
    processed
}
