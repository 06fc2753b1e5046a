use std::fmt;
use std::iter::FusedIterator;
use std::str::Split;

use super::RECORD_DELIMITER;

/// One structure record: the text between two delimiters, trimmed.
///
/// Never empty and never contains [`RECORD_DELIMITER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordBlock<'a> {
    text: &'a str,
}

impl<'a> RecordBlock<'a> {
    /// Record text without the trailing delimiter
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// First line of the record (the molfile title line)
    pub fn title(&self) -> &'a str {
        self.text.lines().next().unwrap_or_default().trim()
    }

    /// Length of the record text in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// True if the record text is empty; never the case for blocks from [`split`]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for RecordBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

/// Lazy iterator over the records of one file's content.
///
/// Clones walk the borrowed content independently.
#[derive(Debug, Clone)]
pub struct RecordBlocks<'a> {
    segments: Split<'a, &'static str>,
}

impl<'a> Iterator for RecordBlocks<'a> {
    type Item = RecordBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        // Blank segments come from leading/trailing delimiters and from
        // consecutive delimiters; they are not records.
        for segment in self.segments.by_ref() {
            let text = segment.trim();
            if !text.is_empty() {
                return Some(RecordBlock { text });
            }
        }
        None
    }
}

impl FusedIterator for RecordBlocks<'_> {}

/// Split text content into record blocks.
///
/// Content without any delimiter that is not blank is a single record (a bare
/// `.mol` file, or an SD file missing its final terminator).
pub fn split(content: &str) -> RecordBlocks<'_> {
    RecordBlocks {
        segments: content.split(RECORD_DELIMITER),
    }
}

/// Number of records in `content`, as [`split`] would yield them.
pub fn count_records(content: &str) -> usize {
    split(content).count()
}
