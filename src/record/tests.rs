use super::*;
use crate::provenance::{ProvenanceStamp, RunTimestamp};
use chrono::{TimeZone, Utc};

const MOL1: &str = "mol1\n  RDKit          2D\n\n  1  0  0  0  0  0  0  0  0  0999 V2000\n    0.0000    0.0000    0.0000 C   0  0\nM  END";
const MOL2: &str = "mol2\n  RDKit          2D\n\n  1  0  0  0  0  0  0  0  0  0999 V2000\n    0.0000    0.0000    0.0000 O   0  0\nM  END";

fn stamp(source: &str) -> ProvenanceStamp {
    let run = RunTimestamp::at(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
    ProvenanceStamp::new(source, &run)
}

fn blocks(content: &str) -> Vec<&str> {
    split(content).map(|b| b.as_str()).collect()
}

// ==================== Splitter Tests ====================

#[test]
fn test_split_two_terminated_records() {
    let content = format!("{MOL1}\n$$$$\n{MOL2}\n$$$$\n");
    assert_eq!(blocks(&content), vec![MOL1, MOL2]);
}

#[test]
fn test_split_empty_and_blank_content() {
    assert_eq!(split("").count(), 0);
    assert_eq!(split("   ").count(), 0);
    assert_eq!(split("\n\r\n\t").count(), 0);
}

#[test]
fn test_split_without_delimiter_is_one_record() {
    let content = format!("{MOL1}\n");
    assert_eq!(blocks(&content), vec![MOL1]);
}

#[test]
fn test_split_unterminated_last_record() {
    let content = format!("{MOL1}\n$$$$\n{MOL2}");
    assert_eq!(blocks(&content), vec![MOL1, MOL2]);
}

#[test]
fn test_split_skips_consecutive_and_only_delimiters() {
    assert_eq!(split("$$$$\n$$$$\n").count(), 0);
    let content = format!("$$$$\n{MOL1}\n$$$$\n\n$$$$\n{MOL2}\n$$$$  \n");
    assert_eq!(blocks(&content), vec![MOL1, MOL2]);
}

#[test]
fn test_split_crlf_content() {
    let content = "a\r\nM  END\r\n$$$$\r\nb\r\nM  END\r\n$$$$\r\n";
    assert_eq!(blocks(content), vec!["a\r\nM  END", "b\r\nM  END"]);
}

#[test]
fn test_split_is_restartable() {
    let content = format!("{MOL1}\n$$$$\n{MOL2}\n$$$$\n");
    let iter = split(&content);
    let first: Vec<_> = iter.clone().collect();
    let second: Vec<_> = iter.collect();
    assert_eq!(first, second);
    assert_eq!(count_records(&content), 2);
}

#[test]
fn test_record_block_title() {
    let content = format!("{MOL1}\n$$$$\n");
    let block = split(&content).next().unwrap();
    assert_eq!(block.title(), "mol1");
    assert!(!block.is_empty());
}

// ==================== Annotator Tests ====================

#[test]
fn test_annotate_layout() {
    let block = split(MOL1).next().unwrap();
    let out = annotate(block, &stamp("A.sdf"));
    let expected = format!(
        "{MOL1}\n> <SOURCE_FILE>\nA.sdf\n\n> <MERGE_TIMESTAMP>\n2024-01-15T10:30:00.000Z\n\n$$$$\n"
    );
    assert_eq!(out, expected);
}

#[test]
fn test_annotate_keeps_existing_fields() {
    let record = format!("{MOL1}\n> <MW>\n12.011\n\n$$$$\n");
    let block = split(&record).next().unwrap();
    let out = annotate(block, &stamp("A.sdf"));

    let fields: Vec<_> = data_fields(&out).collect();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0], DataField { name: "MW", value: "12.011" });
    assert_eq!(fields[1].name, SOURCE_FILE_FIELD);
    assert_eq!(fields[2].name, MERGE_TIMESTAMP_FIELD);
    assert!(out.contains("12.011\n\n> <SOURCE_FILE>\n"));
}

#[test]
fn test_reannotation_appends_second_pair() {
    let first = annotate(split(MOL1).next().unwrap(), &stamp("A.sdf"));
    let again = split(&first).next().unwrap();
    let second = annotate(again, &stamp("B.sdf"));

    let sources: Vec<_> = data_fields(&second)
        .filter(|f| f.name == SOURCE_FILE_FIELD)
        .map(|f| f.value)
        .collect();
    assert_eq!(sources, vec!["A.sdf", "B.sdf"]);
    assert_eq!(second.matches(RECORD_DELIMITER).count(), 1);
}

#[test]
fn test_push_data_field_flattens_line_breaks() {
    let mut out = String::new();
    push_data_field(&mut out, "NAME", "two\nlines");
    assert_eq!(out, "> <NAME>\ntwo lines\n\n");
}

#[test]
fn test_push_data_field_breaks_delimiter_runs() {
    let mut out = String::new();
    push_data_field(&mut out, SOURCE_FILE_FIELD, "price$$$$list.sdf");
    assert_eq!(out, "> <SOURCE_FILE>\nprice$$$ $list.sdf\n\n");

    out.clear();
    push_data_field(&mut out, "NAME", "$$$$$$$$$");
    assert_eq!(out, "> <NAME>\n$$$ $$$ $$$\n\n");
    assert!(!out.contains(RECORD_DELIMITER));
}

#[test]
fn test_annotate_source_with_delimiter_stays_one_record() {
    let out = annotate(split(MOL1).next().unwrap(), &stamp("price$$$$list.sdf"));
    assert_eq!(count_records(&out), 1);
    assert_eq!(out.matches(RECORD_DELIMITER).count(), 1);
}

#[test]
fn test_annotate_into_appends() {
    let mut out = String::from("prefix\n");
    annotate_into(&mut out, split(MOL2).next().unwrap(), &stamp("B.sdf"));
    assert!(out.starts_with("prefix\nmol2\n"));
    assert!(out.ends_with("$$$$\n"));
}

// ==================== Data Field Tests ====================

#[test]
fn test_data_fields_header_variants() {
    let record = "x\nM  END\n> 25  <MELTING.POINT>\n179.0 - 183.0\n\n>  <NOTES> (MD-1)\nline one\nline two\n\n$$$$\n";
    let fields: Vec<_> = data_fields(record).collect();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0], DataField { name: "MELTING.POINT", value: "179.0 - 183.0" });
    assert_eq!(fields[1], DataField { name: "NOTES", value: "line one\nline two" });
}

#[test]
fn test_data_fields_none_in_bare_molfile() {
    assert_eq!(data_fields(MOL1).count(), 0);
}
