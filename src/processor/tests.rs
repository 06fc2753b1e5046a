use super::*;
use crate::archive::test_support::zip_bytes;
use crate::archive::ArchiveEntry;
use crate::provenance::RunTimestamp;
use crate::record::{data_fields, SOURCE_FILE_FIELD};
use chrono::{TimeZone, Utc};

fn stamp(source: &str) -> ProvenanceStamp {
    let run = RunTimestamp::at(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap());
    ProvenanceStamp::new(source, &run)
}

fn success(outcome: FileOutcome) -> ProcessedFile {
    match outcome {
        FileOutcome::Success(processed) => processed,
        FileOutcome::Failure(e) => panic!("expected success, got {e}"),
    }
}

fn sources(content: &str) -> Vec<&str> {
    data_fields(content)
        .filter(|f| f.name == SOURCE_FILE_FIELD)
        .map(|f| f.value)
        .collect()
}

// ==================== Structure File Tests ====================

#[test]
fn test_process_sdf() {
    let file = InputFile::from_bytes("A.sdf", "mol1\nM  END\n$$$$\nmol2\nM  END\n$$$$").unwrap();
    let processed = success(FileProcessor::new().process(&file, &stamp("A.sdf")));

    assert_eq!(processed.record_count, 2);
    assert_eq!(processed.content.matches("$$$$\n").count(), 2);
    assert_eq!(sources(&processed.content), vec!["A.sdf", "A.sdf"]);
    assert!(processed.inner_failures.is_empty());
}

#[test]
fn test_empty_file_is_success_with_zero_records() {
    let file = InputFile::from_bytes("empty.sdf", "  \n").unwrap();
    let processed = success(FileProcessor::new().process(&file, &stamp("empty.sdf")));
    assert_eq!(processed.record_count, 0);
    assert!(processed.content.is_empty());
}

#[test]
fn test_molfile_without_delimiter() {
    let file = InputFile::from_bytes("lig.mol", "lig\n  RDKit\n\nM  END\n").unwrap();
    let processed = success(FileProcessor::new().process(&file, &stamp("lig.mol")));
    assert_eq!(processed.record_count, 1);
    assert!(processed.content.starts_with("lig\n"));
    assert!(processed.content.ends_with("$$$$\n"));
}

#[test]
fn test_byte_order_mark_dropped() {
    let mut bytes = vec![0xEFu8, 0xBB, 0xBF];
    bytes.extend_from_slice(b"bom\nM  END\n$$$$\n");
    let file = InputFile::from_bytes("bom.sdf", bytes).unwrap();
    let processed = success(FileProcessor::new().process(&file, &stamp("bom.sdf")));
    assert!(processed.content.starts_with("bom\n"));
}

#[test]
fn test_invalid_utf8_is_decode_error() {
    let file = InputFile::from_bytes("bad.sdf", b"a\xFF\xFE\n".to_vec()).unwrap();
    let outcome = FileProcessor::new().process(&file, &stamp("bad.sdf"));
    assert!(matches!(outcome, FileOutcome::Failure(ProcessError::Decode(_))));
    assert_eq!(outcome.record_count(), 0);
    if let FileOutcome::Failure(e) = outcome {
        assert!(e.to_string().starts_with("decode error: "));
    }
}

#[test]
fn test_unreadable_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gone.sdf");
    std::fs::write(&path, "x").unwrap();
    let file = InputFile::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let outcome = FileProcessor::new().process(&file, &stamp("gone.sdf"));
    match outcome {
        FileOutcome::Failure(e @ ProcessError::Read(_)) => {
            assert!(e.to_string().starts_with("read error: "))
        }
        other => panic!("expected read error, got {other:?}"),
    }
}

// ==================== Archive Tests ====================

#[test]
fn test_archive_entries_expanded_in_order() {
    let bytes = zip_bytes(&[
        ("first.sdf", "a\nM  END\n$$$$\nb\nM  END\n$$$$\n"),
        ("readme.txt", "not a structure"),
        ("sub/second.mol", "c\nM  END\n"),
    ]);
    let file = InputFile::from_bytes("set.zip", bytes).unwrap();
    let processed = success(FileProcessor::new().process(&file, &stamp("set.zip")));

    assert_eq!(processed.record_count, 3);
    assert_eq!(
        sources(&processed.content),
        vec!["set.zip/first.sdf", "set.zip/first.sdf", "set.zip/sub/second.mol"]
    );
    assert!(processed.inner_failures.is_empty());
}

#[test]
fn test_archive_inner_failure_isolated() {
    let bytes = {
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();
        writer.start_file("bad.sdf", options).unwrap();
        std::io::Write::write_all(&mut writer, b"\xFF\xFE").unwrap();
        writer.start_file("good.sdf", options).unwrap();
        std::io::Write::write_all(&mut writer, b"g\nM  END\n$$$$\n").unwrap();
        writer.finish().unwrap().into_inner()
    };
    let file = InputFile::from_bytes("mixed.zip", bytes).unwrap();
    let processed = success(FileProcessor::new().process(&file, &stamp("mixed.zip")));

    assert_eq!(processed.record_count, 1);
    assert_eq!(processed.inner_failures.len(), 1);
    assert_eq!(processed.inner_failures[0].file, "mixed.zip/bad.sdf");
    assert!(processed.inner_failures[0].error.starts_with("decode error"));
}

#[test]
fn test_corrupt_archive_fails_file() {
    let file = InputFile::from_bytes("broken.zip", "PK but not really").unwrap();
    let outcome = FileProcessor::new().process(&file, &stamp("broken.zip"));
    assert!(matches!(outcome, FileOutcome::Failure(ProcessError::Archive(_))));
}

#[test]
fn test_nested_archive_depth_limit() {
    // Every expansion yields another archive
    struct Nested;
    impl ArchiveExpander for Nested {
        fn expand(&self, _name: &str, _content: &[u8]) -> Result<Vec<ArchiveEntry>, ArchiveError> {
            Ok(vec![ArchiveEntry {
                name: "again.zip".to_string(),
                content: bytes::Bytes::from_static(b"ignored"),
            }])
        }
    }

    let processor = FileProcessor::with_expander(Arc::new(Nested)).with_max_archive_depth(2);
    let file = InputFile::from_bytes("outer.zip", "x").unwrap();
    let processed = success(processor.process(&file, &stamp("outer.zip")));

    assert_eq!(processed.record_count, 0);
    assert_eq!(processed.inner_failures.len(), 1);
    assert_eq!(processed.inner_failures[0].file, "outer.zip/again.zip/again.zip");
    assert!(processed.inner_failures[0].error.contains("nesting deeper than 2"));
}

#[test]
fn test_placeholder_without_expansion() {
    let processor = FileProcessor::without_archive_expansion();
    assert!(!processor.expands_archives());

    let file = InputFile::from_bytes("set.zip", "anything").unwrap();
    let processed = success(processor.process(&file, &stamp("set.zip")));

    assert_eq!(processed.record_count, 1);
    assert!(processed.content.starts_with("set.zip\n"));
    assert!(processed.content.contains(ARCHIVE_PLACEHOLDER_COMMENT));
    assert_eq!(sources(&processed.content), vec!["set.zip"]);
    assert!(processed.content.ends_with("$$$$\n"));
}

#[test]
fn test_placeholder_title_breaks_delimiter_runs() {
    let processor = FileProcessor::without_archive_expansion();
    let file = InputFile::from_bytes("a$$$$b.zip", "anything").unwrap();
    let processed = success(processor.process(&file, &stamp("a$$$$b.zip")));

    assert_eq!(processed.record_count, 1);
    assert_eq!(crate::record::count_records(&processed.content), 1);
    assert!(processed.content.starts_with("a$$$ $b.zip\n"));
}

// ==================== Counting Tests ====================

#[test]
fn test_count_matches_process_without_content() {
    let bytes = zip_bytes(&[
        ("first.sdf", "a\nM  END\n$$$$\nb\nM  END\n$$$$\n"),
        ("second.mol", "c\nM  END\n"),
    ]);
    let files = [
        InputFile::from_bytes("set.zip", bytes).unwrap(),
        InputFile::from_bytes("A.sdf", "x\nM  END\n$$$$\ny\nM  END\n$$$$\nz\n").unwrap(),
    ];

    for file in &files {
        let processed = success(FileProcessor::new().process(file, &stamp(file.name())));
        let counted = success(FileProcessor::new().count(file));
        assert_eq!(counted.record_count, processed.record_count);
        assert!(counted.content.is_empty());
    }
}

#[test]
fn test_count_placeholder_and_failures() {
    let file = InputFile::from_bytes("set.zip", "anything").unwrap();
    assert_eq!(FileProcessor::without_archive_expansion().count(&file).record_count(), 1);
    assert!(matches!(
        FileProcessor::new().count(&file),
        FileOutcome::Failure(ProcessError::Archive(_))
    ));

    let bad = InputFile::from_bytes("bad.sdf", b"\xFF".to_vec()).unwrap();
    assert!(matches!(
        FileProcessor::new().count(&bad),
        FileOutcome::Failure(ProcessError::Decode(_))
    ));
}
