//! # Record Module
//!
//! Delimiter-level handling of SD (structure-data) files: finding record
//! boundaries, appending provenance data fields, and reading data fields back.
//!
//! ## Record Layout
//!
//! ```text
//! <molfile block: header, counts line, atoms, bonds, M  END>
//! > <FIELD_NAME>
//! field value
//!
//! $$$$
//! ```
//!
//! Records are separated by a line holding the `$$$$` sentinel. The splitter
//! does not interpret the molfile block; anything between two sentinels that is
//! not blank is one record.
//!
//! ## Example
//!
//! ```rust
//! use sdfmerge::record::{annotate, split};
//! use sdfmerge::provenance::{ProvenanceStamp, RunTimestamp};
//!
//! let content = "benzene\n  M  END\n$$$$\nethanol\n  M  END\n$$$$\n";
//! let run = RunTimestamp::now();
//! let stamp = ProvenanceStamp::new("input.sdf", &run);
//!
//! let annotated: Vec<String> = split(content).map(|block| annotate(block, &stamp)).collect();
//! assert_eq!(annotated.len(), 2);
//! assert!(annotated[0].ends_with("$$$$\n"));
//! ```

mod annotator;
mod fields;
mod splitter;

#[cfg(test)]
mod tests;

pub use annotator::{annotate, annotate_into, push_data_field, push_single_line};
pub use fields::{data_fields, DataField, DataFields};
pub use splitter::{count_records, split, RecordBlock, RecordBlocks};

/// Sentinel token terminating every record.
pub const RECORD_DELIMITER: &str = "$$$$";

/// Data field carrying the name of the file a record came from.
pub const SOURCE_FILE_FIELD: &str = "SOURCE_FILE";

/// Data field carrying the merge run timestamp.
pub const MERGE_TIMESTAMP_FIELD: &str = "MERGE_TIMESTAMP";
