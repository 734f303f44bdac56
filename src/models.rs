// Core data structures for the tagtrend service

use serde::{Deserialize, Serialize};

/// One row of the question dataset.
///
/// Only the two columns the aggregation needs are mapped; any extra columns
/// in the CSV are ignored. The timestamp stays a raw string here — parsing
/// (and the decision to drop unparseable rows) happens in the aggregator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Raw timestamp as it appears in the dataset
    #[serde(rename = "Time")]
    pub time: String,

    /// Tag label, case-sensitive, not normalized
    #[serde(rename = "Tag")]
    pub tag: String,
}

impl QuestionRecord {
    /// Create a record from raw column values
    pub fn new(time: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            tag: tag.into(),
        }
    }
}

/// One year's normalized share for a single tag, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: i32,
    pub value: f64,
}

/// A tag's complete yearly series, years ascending
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagTrend {
    /// Tag label
    pub tag: String,

    /// Sum of `value` across all years; the ranking key
    pub total_share: f64,

    /// Per-year normalized shares, ordered by ascending year
    pub series: Vec<TrendPoint>,
}

impl TagTrend {
    /// Look up this tag's share for a specific year
    pub fn share_for_year(&self, year: i32) -> Option<f64> {
        self.series
            .iter()
            .find(|point| point.year == year)
            .map(|point| point.value)
    }
}

/// Full aggregation result: ranked top tags plus data-quality counters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendReport {
    /// Top tags ordered by descending `total_share`
    pub tags: Vec<TagTrend>,

    /// Total rows read from the dataset
    pub scanned_rows: usize,

    /// Rows excluded before grouping (unparseable timestamp or blank tag)
    pub dropped_rows: usize,
}

impl TrendReport {
    /// True when the dataset produced no usable rows
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Find a tag's trend by name
    pub fn get(&self, tag: &str) -> Option<&TagTrend> {
        self.tags.iter().find(|t| t.tag == tag)
    }

    /// Tag names in rank order
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.tag.as_str()).collect()
    }
}
