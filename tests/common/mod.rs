//! Common test utilities

use std::io::Write;
use std::path::PathBuf;

use tagtrend::models::QuestionRecord;
use tempfile::TempDir;

/// Create a record with the given timestamp and tag
#[allow(dead_code)]
pub fn record(time: &str, tag: &str) -> QuestionRecord {
    QuestionRecord::new(time, tag)
}

/// Write a CSV dataset into a fresh temp dir, returning the dir and the
/// file path. The dir guard must stay alive for the duration of the test.
#[allow(dead_code)]
pub fn write_dataset(rows: &[(&str, &str)]) -> (TempDir, PathBuf) {
    write_dataset_with_header("Time,Tag", rows)
}

/// Same as [`write_dataset`] but with a custom header line
#[allow(dead_code)]
pub fn write_dataset_with_header(header: &str, rows: &[(&str, &str)]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("questions.csv");

    let mut file = std::fs::File::create(&path).expect("create csv file");
    writeln!(file, "{header}").expect("write header");
    for (time, tag) in rows {
        writeln!(file, "{time},{tag}").expect("write row");
    }

    (dir, path)
}
