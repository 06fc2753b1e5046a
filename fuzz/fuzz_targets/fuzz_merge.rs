#![no_main]

use libfuzzer_sys::fuzz_target;
use sdfmerge::input::InputFile;
use sdfmerge::merge::Merger;
use sdfmerge::record::count_records;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as an SDF file and as a ZIP archive; neither may panic
    let files = [
        InputFile::from_bytes("fuzz.sdf", data.to_vec()).unwrap(),
        InputFile::from_bytes("fuzz.zip", data.to_vec()).unwrap(),
    ];

    if let Ok(result) = Merger::new().merge(&files) {
        assert!(result.content().ends_with("$$$$\n"));
        assert_eq!(result.files().len(), files.len());
        assert_eq!(count_records(result.content()), result.total_records());
    }
});
