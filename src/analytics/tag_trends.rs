//! Yearly tag-share trend aggregation
//!
//! This module provides functionality for:
//! - Parsing record timestamps into calendar years (lenient, multi-format)
//! - Grouping records by (year, tag) and normalizing counts to per-year
//!   percentage shares
//! - Ranking tags by cumulative share and keeping the top N
//!
//! The aggregation is a pure single pass over an in-memory dataset; it is
//! recomputed in full on every invocation and holds no state between calls.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::models::{QuestionRecord, TagTrend, TrendPoint, TrendReport};

/// Number of top tags kept by default
pub const DEFAULT_TOP_TAGS: usize = 10;

/// Date-time formats accepted for record timestamps, tried in order
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Date-only formats accepted for record timestamps
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a record timestamp into its calendar year.
///
/// Accepts RFC 3339 plus the fixed formats above, with surrounding
/// whitespace tolerated. Returns `None` when nothing matches; the caller
/// drops the row.
pub fn parse_record_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(datetime.year());
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.year());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date.year());
        }
    }

    None
}

/// Per-year share table for the whole dataset, before the top-N filter
#[derive(Debug, Default)]
struct ShareTable {
    /// Tag -> per-year shares, years ascending
    shares: BTreeMap<String, Vec<TrendPoint>>,

    /// Tag -> cumulative share across all years
    totals: BTreeMap<String, f64>,

    /// Rows read from the dataset
    scanned: usize,

    /// Rows excluded before grouping
    dropped: usize,
}

/// Group records by (year, tag) and normalize counts to percentages.
///
/// For every year present, the shares over all tags sum to 100. A year only
/// exists once at least one record parsed into it, so the denominator is
/// never zero.
fn compute_share_table(records: &[QuestionRecord]) -> ShareTable {
    let mut dropped = 0usize;
    let mut counts: BTreeMap<i32, BTreeMap<&str, u64>> = BTreeMap::new();

    for record in records {
        let Some(year) = parse_record_year(&record.time) else {
            dropped += 1;
            continue;
        };

        // An absent tag cell deserializes to an empty string; those rows
        // carry no label to group under.
        if record.tag.is_empty() {
            dropped += 1;
            continue;
        }

        *counts
            .entry(year)
            .or_default()
            .entry(record.tag.as_str())
            .or_insert(0) += 1;
    }

    let mut shares: BTreeMap<String, Vec<TrendPoint>> = BTreeMap::new();
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();

    for (&year, tags) in &counts {
        let year_total: u64 = tags.values().sum();

        for (tag, &count) in tags {
            let value = 100.0 * count as f64 / year_total as f64;
            shares
                .entry((*tag).to_string())
                .or_default()
                .push(TrendPoint { year, value });
            *totals.entry((*tag).to_string()).or_insert(0.0) += value;
        }
    }

    ShareTable {
        shares,
        totals,
        scanned: records.len(),
        dropped,
    }
}

/// Aggregate the dataset into ranked per-tag yearly trend series.
///
/// Rows whose timestamp cannot be parsed, or whose tag is empty, are
/// excluded before grouping and reported via `dropped_rows`; they never
/// reach any year's denominator. The result carries at most `top_n` tags,
/// ordered by descending cumulative share. Equal totals keep the
/// alphabetical accumulation order (the sort is stable), so identical input
/// always yields identical output.
pub fn aggregate_tag_trends(records: &[QuestionRecord], top_n: usize) -> TrendReport {
    let ShareTable {
        mut shares,
        totals,
        scanned,
        dropped,
    } = compute_share_table(records);

    let mut ranking: Vec<(String, f64)> = totals.into_iter().collect();
    ranking.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranking.truncate(top_n);

    let tags = ranking
        .into_iter()
        .map(|(tag, total_share)| {
            let series = shares.remove(&tag).unwrap_or_default();
            TagTrend {
                tag,
                total_share,
                series,
            }
        })
        .collect();

    if dropped > 0 {
        tracing::warn!(
            dropped = dropped,
            scanned = scanned,
            "skipped rows with unparseable timestamps or empty tags"
        );
    }

    TrendReport {
        tags,
        scanned_rows: scanned,
        dropped_rows: dropped,
    }
}
