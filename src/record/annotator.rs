use crate::provenance::ProvenanceStamp;

use super::{data_fields, RecordBlock, MERGE_TIMESTAMP_FIELD, RECORD_DELIMITER, SOURCE_FILE_FIELD};

/// Annotate a record with its provenance and terminate it with the delimiter.
///
/// The record body is copied unchanged apart from its line ending: it ends in
/// exactly one `\n` before the `SOURCE_FILE` and `MERGE_TIMESTAMP` fields are
/// appended, in that order. A body that already ends in a data field gets a
/// blank line after that field's value.
pub fn annotate(block: RecordBlock<'_>, stamp: &ProvenanceStamp) -> String {
    let mut out = String::with_capacity(block.len() + 96 + stamp.source_file().len());
    annotate_into(&mut out, block, stamp);
    out
}

/// Like [`annotate`], appending to an existing buffer.
pub fn annotate_into(out: &mut String, block: RecordBlock<'_>, stamp: &ProvenanceStamp) {
    let body = block.as_str().trim_end_matches(|c| c == '\r' || c == '\n');
    out.push_str(body);
    out.push('\n');
    if data_fields(body).next().is_some() {
        out.push('\n');
    }

    push_data_field(out, SOURCE_FILE_FIELD, stamp.source_file());
    push_data_field(out, MERGE_TIMESTAMP_FIELD, stamp.merge_timestamp());

    out.push_str(RECORD_DELIMITER);
    out.push('\n');
}

/// Append one data field: `> <NAME>` header, the value line, a blank line.
///
/// The value is written with [`push_single_line`].
pub fn push_data_field(out: &mut String, name: &str, value: &str) {
    out.push_str("> <");
    out.push_str(name);
    out.push_str(">\n");
    push_single_line(out, value);
    out.push_str("\n\n");
}

/// Append `value` as one line that cannot end a record.
///
/// Line breaks are replaced by spaces, and a space is inserted before every
/// fourth consecutive `$` so the text never contains the record delimiter.
pub fn push_single_line(out: &mut String, value: &str) {
    let mut dollars = 0;
    for c in value.chars() {
        match c {
            '\n' | '\r' => {
                out.push(' ');
                dollars = 0;
            }
            '$' if dollars == RECORD_DELIMITER.len() - 1 => {
                out.push_str(" $");
                dollars = 1;
            }
            '$' => {
                out.push('$');
                dollars += 1;
            }
            _ => {
                out.push(c);
                dollars = 0;
            }
        }
    }
}
