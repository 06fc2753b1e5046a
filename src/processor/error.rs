use crate::archive::ArchiveError;

/// Errors that fail a single input file.
///
/// These never abort a merge: the file's error is recorded in the result and
/// the remaining files are processed.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// The file's bytes could not be read
    #[error("read error: {0}")]
    Read(#[from] std::io::Error),

    /// The file's bytes are not UTF-8 text
    #[error("decode error: {0}")]
    Decode(#[from] std::str::Utf8Error),

    /// The archive could not be expanded
    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),
}
