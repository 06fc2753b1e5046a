use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Extensions read as structure-data text (lowercase, without the dot)
pub const STRUCTURE_EXTENSIONS: &[&str] = &["sdf", "mol"];

/// Extensions read as archives (lowercase, without the dot)
pub const ARCHIVE_EXTENSIONS: &[&str] = &["zip"];

/// How an input file is processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// Multi-record SD file or single-record molfile
    StructureFile,
    /// Archive whose entries are structure files
    Archive,
}

impl FileKind {
    /// Classify a file by the extension of its name (case-insensitive).
    ///
    /// Returns `None` for names without a supported extension.
    pub fn from_name(name: &str) -> Option<Self> {
        let extension = Path::new(name)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();

        if STRUCTURE_EXTENSIONS.contains(&extension.as_str()) {
            Some(FileKind::StructureFile)
        } else if ARCHIVE_EXTENSIONS.contains(&extension.as_str()) {
            Some(FileKind::Archive)
        } else {
            None
        }
    }

    /// True for [`FileKind::Archive`]
    pub fn is_archive(&self) -> bool {
        matches!(self, FileKind::Archive)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::StructureFile => write!(f, "structure file"),
            FileKind::Archive => write!(f, "archive"),
        }
    }
}
