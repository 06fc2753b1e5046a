use std::fs;
use std::path::Path;

use log::{debug, warn};

use super::{FileKind, InputError, InputFile};

/// Ordered selection of files for one merge.
///
/// Rejects duplicates by (name, size) when files are added. Input order is
/// preserved and becomes the record order of the merged output.
#[derive(Debug, Clone, Default)]
pub struct InputBatch {
    files: Vec<InputFile>,
}

impl InputBatch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, rejecting it if a file with the same name and size is present
    pub fn add(&mut self, file: InputFile) -> Result<(), InputError> {
        if self.files.iter().any(|f| f.same_identity(&file)) {
            return Err(InputError::Duplicate {
                name: file.name().to_string(),
                size: file.size(),
            });
        }
        debug!("Added {} ({}, {} bytes)", file.name(), file.kind(), file.size());
        self.files.push(file);
        Ok(())
    }

    /// Add a file from disk
    pub fn add_path(&mut self, path: impl AsRef<Path>) -> Result<(), InputError> {
        self.add(InputFile::from_path(path)?)
    }

    /// Add every supported file directly inside `dir`, sorted by file name.
    ///
    /// Files with unsupported extensions and duplicates are skipped and logged.
    /// Subdirectories are not descended into. Returns the number of files added.
    pub fn add_directory(&mut self, dir: impl AsRef<Path>) -> Result<usize, InputError> {
        let dir = dir.as_ref();
        let io_err = |source| InputError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if !path.is_file() {
                continue;
            }
            let supported = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(FileKind::from_name)
                .is_some();
            if supported {
                paths.push(path);
            } else {
                debug!("Skipping unsupported file {}", path.display());
            }
        }
        paths.sort();

        let mut added = 0;
        for path in paths {
            match self.add_path(&path) {
                Ok(()) => added += 1,
                Err(e @ InputError::Duplicate { .. }) => warn!("{}", e),
                Err(e) => return Err(e),
            }
        }
        Ok(added)
    }

    /// Remove the file at `index`
    pub fn remove(&mut self, index: usize) -> Option<InputFile> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            None
        }
    }

    /// Remove all files
    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Number of files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True if no files were added
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files in input order
    pub fn files(&self) -> &[InputFile] {
        &self.files
    }

    /// Sum of the file sizes in bytes
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(InputFile::size).sum()
    }
}
