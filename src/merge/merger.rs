use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::input::InputFile;
use crate::processor::{FileFailure, FileOutcome, FileProcessor, ProcessError};
use crate::provenance::{ProvenanceStamp, RunTimestamp};
use crate::record::RECORD_DELIMITER;

use super::read_ahead::read_in_order;
use super::{
    CancellationToken, FileSummary, MergeError, MergeResult, MergeStage, MergerConfig, NoProgress,
    ProgressEvent, ProgressObserver,
};

/// Prefix of generated output file names
pub const OUTPUT_FILE_PREFIX: &str = "merged_sdf_";

/// Output file name for a run: `merged_sdf_YYYY-MM-DD-HH-MM-SS.sdf`
pub fn output_file_name(run: &RunTimestamp) -> String {
    format!("{}{}.sdf", OUTPUT_FILE_PREFIX, run.file_safe())
}

/// Merges batches of input files into one annotated SDF stream.
///
/// A merger runs one merge at a time; a second call while a merge is running
/// fails with [`MergeError::ConcurrentMerge`].
#[derive(Debug)]
pub struct Merger {
    processor: FileProcessor,
    config: MergerConfig,
    in_progress: AtomicBool,
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}

impl Merger {
    /// Merger with the default configuration
    pub fn new() -> Self {
        Self::with_config(MergerConfig::default())
    }

    /// Merger with `config`
    pub fn with_config(config: MergerConfig) -> Self {
        let processor = config.processor();
        Self::with_processor(config, processor)
    }

    /// Merger using a custom processor; `config.expand_archives` and
    /// `config.max_archive_depth` are then ignored
    pub fn with_processor(config: MergerConfig, processor: FileProcessor) -> Self {
        Self {
            processor,
            config,
            in_progress: AtomicBool::new(false),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &MergerConfig {
        &self.config
    }

    /// True while a merge is running
    pub fn is_merging(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    /// Merge `files` in order, timestamped now.
    pub fn merge(&self, files: &[InputFile]) -> Result<MergeResult, MergeError> {
        self.merge_with(files, RunTimestamp::now(), &NoProgress, &CancellationToken::new())
    }

    /// Merge `files` in order with an explicit run timestamp, reporting
    /// progress to `observer` and stopping between files once `cancel` is
    /// cancelled.
    ///
    /// Files that fail are listed in [`MergeResult::failures`] and the run
    /// continues. A cancelled run returns the records merged so far.
    pub fn merge_with<O>(
        &self,
        files: &[InputFile],
        run: RunTimestamp,
        observer: &O,
        cancel: &CancellationToken,
    ) -> Result<MergeResult, MergeError>
    where
        O: ProgressObserver + ?Sized,
    {
        if files.is_empty() {
            return Err(MergeError::EmptyBatch);
        }
        let _guard = MergeGuard::acquire(&self.in_progress)?;

        let total = files.len();
        let base = ProvenanceStamp::new("", &run);
        let mut stream = MergeStream::default();
        info!("Merging {} files (run {})", total, run.field_value());

        read_in_order(files, self.config.read_concurrency, |index, content| {
            let file = &files[index];
            let event = |stage| ProgressEvent {
                index,
                total,
                file: file.name().to_string(),
                stage,
            };

            if cancel.is_cancelled() {
                info!("Merge cancelled before {}", file.name());
                stream.cancelled = true;
                observer.on_progress(&event(MergeStage::Cancelled));
                return ControlFlow::Break(());
            }

            let outcome = match content {
                Ok(bytes) => {
                    observer.on_progress(&event(MergeStage::Loaded));
                    let stamp = base.for_source(file.name());
                    self.processor.process_loaded(file.kind(), &bytes, &stamp)
                }
                Err(e) => FileOutcome::Failure(ProcessError::Read(e)),
            };

            let stage = stream.push(file, outcome);
            observer.on_progress(&event(stage));
            ControlFlow::Continue(())
        });

        let file_name = output_file_name(&run);
        let content = finish_stream(stream.content);
        info!(
            "Merged {} records from {} files into {} ({} bytes)",
            stream.total_records,
            stream.files.len(),
            file_name,
            content.len()
        );
        observer.on_progress(&ProgressEvent {
            index: total,
            total,
            file: file_name.clone(),
            stage: MergeStage::Finished {
                records: stream.total_records,
            },
        });

        Ok(MergeResult {
            total_records: stream.total_records,
            content,
            failures: stream.failures,
            files: stream.files,
            file_name,
            run,
            cancelled: stream.cancelled,
        })
    }
}

/// Accumulates processed files in input order
#[derive(Default)]
struct MergeStream {
    content: String,
    total_records: usize,
    failures: Vec<FileFailure>,
    files: Vec<FileSummary>,
    cancelled: bool,
}

impl MergeStream {
    fn push(&mut self, file: &InputFile, outcome: FileOutcome) -> MergeStage {
        match outcome {
            FileOutcome::Success(processed) => {
                debug!("{}: {} records", file.name(), processed.record_count);
                for failure in &processed.inner_failures {
                    warn!("Skipped {}", failure);
                }

                self.content.push_str(&processed.content);
                self.total_records += processed.record_count;
                self.failures.extend(processed.inner_failures);
                self.files.push(FileSummary {
                    file: file.name().to_string(),
                    kind: file.kind(),
                    modified: file.modified().map(DateTime::<Utc>::from),
                    records: processed.record_count,
                    error: None,
                });
                MergeStage::Merged {
                    records: processed.record_count,
                }
            }
            FileOutcome::Failure(e) => {
                warn!("Failed to merge {}: {}", file.name(), e);
                let failure = FileFailure::new(file.name(), &e);
                self.files.push(FileSummary {
                    file: file.name().to_string(),
                    kind: file.kind(),
                    modified: file.modified().map(DateTime::<Utc>::from),
                    records: 0,
                    error: Some(failure.error.clone()),
                });
                let stage = MergeStage::Failed {
                    error: failure.error.clone(),
                };
                self.failures.push(failure);
                stage
            }
        }
    }
}

/// Normalize the end of the merged stream: trailing whitespace removed, a
/// final delimiter line guaranteed, one terminating newline.
pub(crate) fn finish_stream(mut content: String) -> String {
    let end = content.trim_end().len();
    content.truncate(end);
    if !content.ends_with(RECORD_DELIMITER) {
        content.push('\n');
        content.push_str(RECORD_DELIMITER);
    }
    content.push('\n');
    content
}

/// Holds a merger's in-progress flag for the duration of one merge
struct MergeGuard<'a>(&'a AtomicBool);

impl<'a> MergeGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, MergeError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Self(flag))
            .map_err(|_| MergeError::ConcurrentMerge)
    }
}

impl Drop for MergeGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
