//! End-to-end aggregation tests over real CSV files
//!
//! These exercise the loader and the aggregator together, the same path
//! the /data handler takes.

mod common;

use tagtrend::analytics::aggregate_tag_trends;
use tagtrend::dataset::load_records;

#[test]
fn test_two_tags_split_the_year() {
    let (_dir, path) = common::write_dataset(&[
        ("2022-01-04 09:12:31", "python"),
        ("2022-03-15 10:00:00", "python"),
        ("2022-07-01 08:30:00", "java"),
    ]);

    let records = load_records(&path).unwrap();
    let report = aggregate_tag_trends(&records, 10);

    assert_eq!(report.scanned_rows, 3);
    assert_eq!(report.dropped_rows, 0);
    assert_eq!(report.tags.len(), 2);

    // python has two of three 2022 questions
    assert_eq!(report.tags[0].tag, "python");
    let python_2022 = report.tags[0].share_for_year(2022).unwrap();
    assert!((python_2022 - 200.0 / 3.0).abs() < 1e-9);

    assert_eq!(report.tags[1].tag, "java");
    let java_2022 = report.tags[1].share_for_year(2022).unwrap();
    assert!((java_2022 - 100.0 / 3.0).abs() < 1e-9);

    // together they cover the whole year
    assert!((python_2022 + java_2022 - 100.0).abs() < 1e-6);
}

#[test]
fn test_each_year_sums_to_one_hundred() {
    let (_dir, path) = common::write_dataset(&[
        ("2022-01-01 00:00:00", "python"),
        ("2022-02-01 00:00:00", "java"),
        ("2022-03-01 00:00:00", "css"),
        ("2023-01-01 00:00:00", "python"),
        ("2023-02-01 00:00:00", "python"),
        ("2023-03-01 00:00:00", "react"),
        ("2024-01-01 00:00:00", "java"),
    ]);

    let records = load_records(&path).unwrap();
    // fewer than ten distinct tags, so the report sees every share
    let report = aggregate_tag_trends(&records, 10);

    for year in [2022, 2023, 2024] {
        let sum: f64 = report
            .tags
            .iter()
            .filter_map(|t| t.share_for_year(year))
            .sum();
        assert!(
            (sum - 100.0).abs() < 1e-6,
            "year {year} shares sum to {sum}, expected 100"
        );
    }
}

#[test]
fn test_report_keeps_at_most_top_n() {
    let tags = [
        "python", "java", "javascript", "c++", "c#", "html", "css", "react", "angular", "flutter",
        "rust", "go",
    ];
    let rows: Vec<(&str, &str)> = tags
        .iter()
        .map(|tag| ("2022-06-01 12:00:00", *tag))
        .collect();
    let (_dir, path) = common::write_dataset(&rows);

    let records = load_records(&path).unwrap();
    let report = aggregate_tag_trends(&records, 10);

    assert_eq!(report.scanned_rows, 12);
    assert_eq!(report.tags.len(), 10);

    let smaller = aggregate_tag_trends(&records, 3);
    assert_eq!(smaller.tags.len(), 3);
}

#[test]
fn test_ranking_is_monotone() {
    // python 3x, java 2x, css 1x within one year
    let (_dir, path) = common::write_dataset(&[
        ("2022-01-01 00:00:00", "python"),
        ("2022-02-01 00:00:00", "python"),
        ("2022-03-01 00:00:00", "python"),
        ("2022-04-01 00:00:00", "java"),
        ("2022-05-01 00:00:00", "java"),
        ("2022-06-01 00:00:00", "css"),
    ]);

    let records = load_records(&path).unwrap();
    let report = aggregate_tag_trends(&records, 2);

    assert_eq!(report.tag_names(), vec!["python", "java"]);
    for pair in report.tags.windows(2) {
        assert!(pair[0].total_share >= pair[1].total_share);
    }
}

#[test]
fn test_malformed_timestamps_never_reach_denominators() {
    let (_dir, path) = common::write_dataset(&[
        ("2022-01-01 00:00:00", "python"),
        ("not-a-date", "java"),
        ("", "css"),
    ]);

    let records = load_records(&path).unwrap();
    let report = aggregate_tag_trends(&records, 10);

    assert_eq!(report.scanned_rows, 3);
    assert_eq!(report.dropped_rows, 2);

    // python is the only valid 2022 row, so its share is exactly 100
    assert_eq!(report.tags.len(), 1);
    assert_eq!(report.tags[0].tag, "python");
    assert_eq!(report.tags[0].share_for_year(2022), Some(100.0));
}

#[test]
fn test_empty_dataset_yields_empty_report() {
    let (_dir, path) = common::write_dataset(&[]);

    let records = load_records(&path).unwrap();
    assert!(records.is_empty());

    let report = aggregate_tag_trends(&records, 10);
    assert!(report.is_empty());
    assert_eq!(report.scanned_rows, 0);
    assert_eq!(report.dropped_rows, 0);
}

#[test]
fn test_missing_file_is_a_distinct_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.csv");

    let err = load_records(&path).unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("nope.csv"));
}

#[test]
fn test_series_spans_years_in_order() {
    // deliberately shuffled input years
    let (_dir, path) = common::write_dataset(&[
        ("2024-05-01 00:00:00", "python"),
        ("2022-05-01 00:00:00", "python"),
        ("2023-05-01 00:00:00", "python"),
        ("2023-06-01 00:00:00", "java"),
    ]);

    let records = load_records(&path).unwrap();
    let report = aggregate_tag_trends(&records, 10);

    let python = report.get("python").unwrap();
    let years: Vec<i32> = python.series.iter().map(|p| p.year).collect();
    assert_eq!(years, vec![2022, 2023, 2024]);

    // a tag absent in a year simply has no point for it
    let java = report.get("java").unwrap();
    assert_eq!(java.series.len(), 1);
    assert_eq!(java.series[0].year, 2023);
}

#[test]
fn test_mixed_timestamp_formats_in_one_file() {
    let (_dir, path) = common::write_dataset(&[
        ("2022-01-04 09:12:31", "python"),
        ("2022-02-10T14:30:00", "python"),
        ("2022-03-05", "python"),
        ("2022/04/20", "python"),
        ("2022-05-01T09:00:00+09:00", "python"),
    ]);

    let records = load_records(&path).unwrap();
    let report = aggregate_tag_trends(&records, 10);

    assert_eq!(report.dropped_rows, 0);
    assert_eq!(report.tags[0].share_for_year(2022), Some(100.0));
}

#[test]
fn test_sample_dataset_loads_cleanly() {
    // the shipped sample must stay aligned with the loader
    let records = load_records(std::path::Path::new("data/questions_sample.csv")).unwrap();
    assert_eq!(records.len(), 55);

    let report = aggregate_tag_trends(&records, 10);
    assert_eq!(report.scanned_rows, 55);
    assert_eq!(report.dropped_rows, 0);
    assert_eq!(report.tags.len(), 10);
    assert_eq!(report.tags[0].tag, "python");
}
