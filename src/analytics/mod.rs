//! Analytics module for tag trend analysis
//!
//! One concern lives here: turning the raw question dataset into ranked
//! yearly tag-share series.

pub mod tag_trends;

pub use tag_trends::{aggregate_tag_trends, parse_record_year, DEFAULT_TOP_TAGS};
