/// Errors that can occur while expanding an archive
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// The archive is not a readable ZIP file
    #[error("ZIP error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// I/O error while decompressing an entry
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// An entry decompresses to more than the configured limit
    #[error("entry {name} exceeds the {limit} byte limit")]
    EntryTooLarge {
        /// Entry path inside the archive
        name: String,
        /// Configured limit in bytes
        limit: u64,
    },

    /// Archives nested inside archives beyond the configured depth
    #[error("archive nesting deeper than {0} levels")]
    NestedTooDeep(usize),
}
