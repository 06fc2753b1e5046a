//! # Merged File Validation
//!
//! Checks that a merged SDF file is well formed:
//!
//! 1. **Records**: the file contains at least one record
//! 2. **Termination**: the last line is a `$$$$` delimiter followed by a newline
//! 3. **Delimiters**: every `$$$$` sits on a line of its own
//! 4. **Provenance**: every record carries `SOURCE_FILE` and `MERGE_TIMESTAMP`
//! 5. **Timestamps**: every `MERGE_TIMESTAMP` parses as RFC 3339; more than one
//!    distinct value means the file holds records from several merge runs
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sdfmerge::validator::validate_merged_file;
//! use std::path::Path;
//!
//! match validate_merged_file(Path::new("merged_sdf_2024-01-15-10-30-00.sdf")) {
//!     Ok(report) => println!("{}", report),
//!     Err(e) => eprintln!("Validation failed: {}", e),
//! }
//! ```

use std::path::{Path, PathBuf};

mod checks;
mod report;

pub use report::{CheckStatus, ValidationCheck, ValidationReport};

/// Errors that prevent validation from running
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File being validated
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file is not UTF-8 text
    #[error("{path} is not valid UTF-8: {source}")]
    Decode {
        /// File being validated
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::str::Utf8Error,
    },
}

/// Validate merged SDF text. `file` only labels the report.
pub fn validate_merged(file: impl Into<String>, content: &str) -> ValidationReport {
    let mut report = ValidationReport::new(file);

    checks::check_not_empty(content, &mut report);
    checks::check_terminated(content, &mut report);
    checks::check_delimiter_lines(content, &mut report);
    checks::check_provenance(content, &mut report);
    checks::check_timestamps(content, &mut report);

    report
}

/// Read and validate a merged SDF file
pub fn validate_merged_file(path: &Path) -> Result<ValidationReport, ValidationError> {
    let bytes = std::fs::read(path).map_err(|source| ValidationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let content = std::str::from_utf8(&bytes).map_err(|source| ValidationError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(validate_merged(path.display().to_string(), content))
}
