use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use bytes::Bytes;

use super::{FileKind, InputError};

/// Where an input file's bytes come from
#[derive(Debug, Clone)]
pub enum FileSource {
    /// Content already in memory
    Memory(Bytes),
    /// Content read from disk when the merge reaches the file
    Path(PathBuf),
}

/// One file submitted for merging.
///
/// Immutable once created. The kind is fixed at creation from the file name,
/// so unsupported files never reach a merge.
#[derive(Debug, Clone)]
pub struct InputFile {
    name: String,
    size: u64,
    modified: Option<SystemTime>,
    kind: FileKind,
    source: FileSource,
}

impl InputFile {
    /// Create an input file from in-memory content
    pub fn from_bytes(name: impl Into<String>, content: impl Into<Bytes>) -> Result<Self, InputError> {
        let name = name.into();
        let kind = FileKind::from_name(&name)
            .ok_or_else(|| InputError::UnsupportedKind { name: name.clone() })?;
        let content = content.into();

        Ok(Self {
            size: content.len() as u64,
            name,
            modified: None,
            kind,
            source: FileSource::Memory(content),
        })
    }

    /// Create an input file backed by a path on disk.
    ///
    /// Only the file's metadata is read here; the content is read during the
    /// merge, where a failure is recorded against this file alone.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| InputError::InvalidPath(path.to_path_buf()))?
            .to_string();
        let kind = FileKind::from_name(&name)
            .ok_or_else(|| InputError::UnsupportedKind { name: name.clone() })?;

        let metadata = fs::metadata(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            name,
            size: metadata.len(),
            modified: metadata.modified().ok(),
            kind,
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    /// Set the modification time reported by the caller
    pub fn with_modified(mut self, modified: SystemTime) -> Self {
        self.modified = Some(modified);
        self
    }

    /// File name (no directory part for path-backed files)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes at creation time
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Modification time, when known
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    /// Declared kind
    pub fn kind(&self) -> FileKind {
        self.kind
    }

    /// Content source
    pub fn source(&self) -> &FileSource {
        &self.source
    }

    /// True if this file and `other` share the identity used for de-duplication
    pub fn same_identity(&self, other: &InputFile) -> bool {
        self.name == other.name && self.size == other.size
    }

    /// Load the file's bytes. This is the only blocking step of a merge.
    pub fn read(&self) -> io::Result<Bytes> {
        match &self.source {
            FileSource::Memory(bytes) => Ok(bytes.clone()),
            FileSource::Path(path) => fs::read(path).map(Bytes::from),
        }
    }
}
