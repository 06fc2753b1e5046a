use crate::processor::{FileProcessor, DEFAULT_MAX_ARCHIVE_DEPTH};

/// Configuration for a [`Merger`](super::Merger)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergerConfig {
    /// Number of threads reading input files ahead of processing (1 = read
    /// on the merging thread)
    pub read_concurrency: usize,
    /// Expand archives; when false each archive becomes one placeholder record
    pub expand_archives: bool,
    /// Levels of archives inside archives that are expanded
    pub max_archive_depth: usize,
}

impl Default for MergerConfig {
    fn default() -> Self {
        Self {
            read_concurrency: 4,
            expand_archives: true,
            max_archive_depth: DEFAULT_MAX_ARCHIVE_DEPTH,
        }
    }
}

impl MergerConfig {
    /// Read files on the merging thread only
    pub fn sequential() -> Self {
        Self {
            read_concurrency: 1,
            ..Default::default()
        }
    }

    /// Set the number of reader threads (values below 1 mean 1)
    pub fn with_read_concurrency(mut self, read_concurrency: usize) -> Self {
        self.read_concurrency = read_concurrency.max(1);
        self
    }

    /// Enable or disable archive expansion
    pub fn with_expand_archives(mut self, expand_archives: bool) -> Self {
        self.expand_archives = expand_archives;
        self
    }

    /// Set the archive nesting limit
    pub fn with_max_archive_depth(mut self, max_archive_depth: usize) -> Self {
        self.max_archive_depth = max_archive_depth;
        self
    }

    /// File processor honoring the archive settings
    pub fn processor(&self) -> FileProcessor {
        let processor = if self.expand_archives {
            FileProcessor::new()
        } else {
            FileProcessor::without_archive_expansion()
        };
        processor.with_max_archive_depth(self.max_archive_depth)
    }
}
