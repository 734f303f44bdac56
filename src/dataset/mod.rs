//! Dataset loading for the tagtrend service
//!
//! The question dataset is a flat delimited-text file with at least the
//! `Time` and `Tag` columns. It is small enough to be read in full on every
//! request, so this module exposes plain eager loaders and no caching.

use std::io;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::QuestionRecord;

/// Load all records from a CSV file.
///
/// A missing file is reported as the distinct [`Error::DatasetNotFound`] so
/// the HTTP boundary can answer "not found" instead of a generic failure.
/// Schema problems (missing `Time`/`Tag` column, ragged rows) surface as
/// [`Error::Csv`].
pub fn load_records(path: &Path) -> Result<Vec<QuestionRecord>> {
    if !path.exists() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }

    let reader = csv::Reader::from_path(path)?;
    collect_records(reader)
}

/// Read records from any byte source, e.g. an in-memory fixture.
pub fn read_records<R: io::Read>(source: R) -> Result<Vec<QuestionRecord>> {
    collect_records(csv::Reader::from_reader(source))
}

fn collect_records<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<QuestionRecord>> {
    let records = reader
        .deserialize()
        .collect::<std::result::Result<Vec<QuestionRecord>, csv::Error>>()?;

    tracing::debug!(rows = records.len(), "dataset loaded");
    Ok(records)
}
