use std::path::PathBuf;

/// Errors raised while building an input batch, before any merge runs
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// File name has no supported extension
    #[error("unsupported file type: {name} (expected .sdf, .mol or .zip)")]
    UnsupportedKind {
        /// Rejected file name
        name: String,
    },

    /// A file with the same name and size is already in the batch
    #[error("duplicate file: {name} ({size} bytes) is already selected")]
    Duplicate {
        /// File name
        name: String,
        /// File size in bytes
        size: u64,
    },

    /// Path has no usable file name
    #[error("invalid input path: {0}")]
    InvalidPath(PathBuf),

    /// Failed to inspect a file or directory on disk
    #[error("failed to access {path}: {source}")]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
