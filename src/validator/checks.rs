use std::collections::BTreeSet;

use chrono::DateTime;

use crate::record::{data_fields, split, MERGE_TIMESTAMP_FIELD, RECORD_DELIMITER, SOURCE_FILE_FIELD};

use super::{ValidationCheck, ValidationReport};

/// Record numbers listed in a failure message before eliding the rest
const MAX_LISTED: usize = 5;

pub(super) const CHECK_NOT_EMPTY: &str = "Output is not empty";
pub(super) const CHECK_TERMINATED: &str = "Ends with a delimiter line";
pub(super) const CHECK_DELIMITER_LINES: &str = "Delimiters on their own lines";
pub(super) const CHECK_PROVENANCE: &str = "Records carry provenance fields";
pub(super) const CHECK_TIMESTAMPS: &str = "Merge timestamps are valid";

pub(super) fn check_not_empty(content: &str, report: &mut ValidationReport) {
    report.record_count = split(content).count();
    if report.record_count > 0 {
        report.push(ValidationCheck::passed(CHECK_NOT_EMPTY));
    } else {
        report.push(ValidationCheck::warning(CHECK_NOT_EMPTY, "no records found"));
    }
}

pub(super) fn check_terminated(content: &str, report: &mut ValidationReport) {
    let last_line = content.trim_end().lines().last().map(str::trim_end);
    if last_line != Some(RECORD_DELIMITER) {
        report.push(ValidationCheck::failed(
            CHECK_TERMINATED,
            format!("last line is not {}", RECORD_DELIMITER),
        ));
    } else if !content.ends_with('\n') {
        report.push(ValidationCheck::warning(CHECK_TERMINATED, "missing final newline"));
    } else {
        report.push(ValidationCheck::passed(CHECK_TERMINATED));
    }
}

pub(super) fn check_delimiter_lines(content: &str, report: &mut ValidationReport) {
    let stray: Vec<usize> = content
        .lines()
        .enumerate()
        .filter(|(_, line)| line.contains(RECORD_DELIMITER) && line.trim() != RECORD_DELIMITER)
        .map(|(n, _)| n + 1)
        .collect();

    if stray.is_empty() {
        report.push(ValidationCheck::passed(CHECK_DELIMITER_LINES));
    } else {
        report.push(ValidationCheck::warning(
            CHECK_DELIMITER_LINES,
            format!("delimiter inside text on line(s) {}", list(&stray)),
        ));
    }
}

pub(super) fn check_provenance(content: &str, report: &mut ValidationReport) {
    let mut missing = Vec::new();
    for (n, block) in split(content).enumerate() {
        let mut has_source = false;
        let mut has_timestamp = false;
        for field in data_fields(block.as_str()) {
            has_source |= field.name == SOURCE_FILE_FIELD;
            has_timestamp |= field.name == MERGE_TIMESTAMP_FIELD;
        }
        if !(has_source && has_timestamp) {
            missing.push(n + 1);
        }
    }

    if missing.is_empty() {
        report.push(ValidationCheck::passed(CHECK_PROVENANCE));
    } else {
        report.push(ValidationCheck::failed(
            CHECK_PROVENANCE,
            format!(
                "{} record(s) missing {} or {}: {}",
                missing.len(),
                SOURCE_FILE_FIELD,
                MERGE_TIMESTAMP_FIELD,
                list(&missing)
            ),
        ));
    }
}

pub(super) fn check_timestamps(content: &str, report: &mut ValidationReport) {
    let mut runs = BTreeSet::new();
    let mut invalid = BTreeSet::new();
    for field in data_fields(content).filter(|f| f.name == MERGE_TIMESTAMP_FIELD) {
        match DateTime::parse_from_rfc3339(field.value.trim()) {
            Ok(at) => {
                runs.insert(at);
            }
            Err(_) => {
                invalid.insert(field.value);
            }
        }
    }

    if !invalid.is_empty() {
        let values: Vec<&str> = invalid.into_iter().take(MAX_LISTED).collect();
        report.push(ValidationCheck::failed(
            CHECK_TIMESTAMPS,
            format!("unparseable timestamp(s): {}", values.join(", ")),
        ));
    } else if runs.len() > 1 {
        report.push(ValidationCheck::warning(
            CHECK_TIMESTAMPS,
            format!("records come from {} merge runs", runs.len()),
        ));
    } else {
        report.push(ValidationCheck::passed(CHECK_TIMESTAMPS));
    }
}

fn list(numbers: &[usize]) -> String {
    let mut listed: Vec<String> = numbers.iter().take(MAX_LISTED).map(usize::to_string).collect();
    if numbers.len() > MAX_LISTED {
        listed.push(format!("... ({} more)", numbers.len() - MAX_LISTED));
    }
    listed.join(", ")
}
