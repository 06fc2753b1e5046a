//! # Archive Module
//!
//! Archive expansion is a collaborator of the file processor: given the bytes
//! of an archive it yields the archive's entries, which are then processed
//! like any other input file. [`ZipExpander`] is the implementation used by
//! default; other containers can be supported by implementing
//! [`ArchiveExpander`].

mod error;
mod zip_expander;

pub use error::ArchiveError;
pub use zip_expander::{ZipExpander, DEFAULT_MAX_ENTRY_BYTES};

use bytes::Bytes;

/// One file extracted from an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Entry path inside the archive (`dir/file.sdf`)
    pub name: String,
    /// Uncompressed entry content
    pub content: Bytes,
}

/// Expands archive bytes into their file entries.
///
/// Implementations return entries in archive order and skip directory entries.
/// They do not filter by file type; the processor decides which entries to use.
pub trait ArchiveExpander: Send + Sync {
    /// Expand `content`, the bytes of the archive called `archive_name`
    fn expand(&self, archive_name: &str, content: &[u8]) -> Result<Vec<ArchiveEntry>, ArchiveError>;
}
