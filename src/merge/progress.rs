use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// What happened to the file named in a [`ProgressEvent`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeStage {
    /// The file's bytes were read
    Loaded,
    /// The file's records were appended to the output
    Merged {
        /// Records contributed by the file
        records: usize,
    },
    /// The file failed and was skipped
    Failed {
        /// Error message recorded for the file
        error: String,
    },
    /// The run was cancelled before this file
    Cancelled,
    /// The run finished; `file` names the output file
    Finished {
        /// Records in the merged output
        records: usize,
    },
}

/// Progress notification, sent after each unit of work completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Zero-based index of the file in the batch (`total` for `Finished`)
    pub index: usize,
    /// Number of files in the batch
    pub total: usize,
    /// File the event refers to
    pub file: String,
    /// What happened
    pub stage: MergeStage,
}

impl ProgressEvent {
    /// Fraction of the batch done once this event's file is complete (0.0..=1.0)
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.index + 1).min(self.total) as f64 / self.total as f64
    }
}

/// Receives progress events from a running merge.
///
/// Called on the merging thread; implementations should return quickly.
pub trait ProgressObserver {
    /// Handle one event
    fn on_progress(&self, event: &ProgressEvent);
}

impl<F> ProgressObserver for F
where
    F: Fn(&ProgressEvent),
{
    fn on_progress(&self, event: &ProgressEvent) {
        self(event)
    }
}

/// Observer that ignores all events
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&self, _event: &ProgressEvent) {}
}

/// Cancels a running merge between files.
///
/// Clones share the same flag. Files already merged stay in the result.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// True once [`cancel`](Self::cancel) was called on any clone
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
