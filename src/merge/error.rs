/// Errors that prevent a merge from running at all.
///
/// Per-file problems are not errors at this level; they are listed in the
/// [`MergeResult`](super::MergeResult).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// The batch contains no files
    #[error("no input files to merge")]
    EmptyBatch,

    /// Another merge is running on the same merger
    #[error("a merge is already in progress")]
    ConcurrentMerge,
}
