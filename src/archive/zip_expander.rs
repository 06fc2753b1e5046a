use std::io::{Cursor, Read};

use bytes::Bytes;
use log::debug;
use zip::ZipArchive;

use super::{ArchiveEntry, ArchiveError, ArchiveExpander};

/// Default per-entry decompressed size limit (512 MiB)
pub const DEFAULT_MAX_ENTRY_BYTES: u64 = 512 * 1024 * 1024;

/// Prefix of the resource-fork entries macOS adds to archives it creates
const MACOS_METADATA_PREFIX: &str = "__MACOSX/";

/// [`ArchiveExpander`] for ZIP archives (stored or deflated entries)
#[derive(Debug, Clone)]
pub struct ZipExpander {
    max_entry_bytes: u64,
}

impl Default for ZipExpander {
    fn default() -> Self {
        Self {
            max_entry_bytes: DEFAULT_MAX_ENTRY_BYTES,
        }
    }
}

impl ZipExpander {
    /// Create an expander with the default entry size limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum decompressed size of a single entry
    pub fn with_max_entry_bytes(mut self, max_entry_bytes: u64) -> Self {
        self.max_entry_bytes = max_entry_bytes;
        self
    }
}

impl ArchiveExpander for ZipExpander {
    fn expand(&self, archive_name: &str, content: &[u8]) -> Result<Vec<ArchiveEntry>, ArchiveError> {
        let mut archive = ZipArchive::new(Cursor::new(content))?;
        let mut entries = Vec::with_capacity(archive.len());

        for index in 0..archive.len() {
            let entry = archive.by_index(index)?;
            let name = entry.name().to_string();
            if entry.is_dir() || name.starts_with(MACOS_METADATA_PREFIX) {
                debug!("{}: skipping entry {}", archive_name, name);
                continue;
            }

            // The declared size can lie; cap the actual read instead.
            let mut buffer = Vec::with_capacity(entry.size().min(self.max_entry_bytes) as usize);
            entry.take(self.max_entry_bytes.saturating_add(1)).read_to_end(&mut buffer)?;
            if buffer.len() as u64 > self.max_entry_bytes {
                return Err(ArchiveError::EntryTooLarge {
                    name,
                    limit: self.max_entry_bytes,
                });
            }

            entries.push(ArchiveEntry {
                name,
                content: Bytes::from(buffer),
            });
        }

        debug!("{}: expanded {} entries", archive_name, entries.len());
        Ok(entries)
    }
}
