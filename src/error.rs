//! Unified error handling for the tagtrend crate
//!
//! All library code returns [`Error`]; the HTTP boundary maps error kinds to
//! status codes (missing dataset vs. everything else) and the binary wraps
//! the remainder in `anyhow` at the very edge.

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for the tagtrend crate
#[derive(Error, Debug)]
pub enum Error {
    /// The configured dataset file does not exist
    #[error("dataset file not found: {}", path.display())]
    DatasetNotFound { path: PathBuf },

    /// CSV reading or row deserialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Failed to bind the server listener
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// Server runtime error
    #[error("server error: {0}")]
    Serve(#[source] io::Error),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }

    /// Create a generic error with context and source
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    /// True for the "missing input source" case the boundary reports as 404.
    ///
    /// Everything else is a deployment or processing failure (500).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DatasetNotFound { .. })
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let err = Error::DatasetNotFound {
            path: PathBuf::from("data/missing.csv"),
        };
        assert!(err.is_not_found());

        let err = Error::config("bad top_tags");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_message_includes_path() {
        let err = Error::DatasetNotFound {
            path: PathBuf::from("data/questions.csv"),
        };
        assert!(err.to_string().contains("data/questions.csv"));
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_other_error_context() {
        let err = Error::other("aggregation task failed");
        assert_eq!(err.to_string(), "aggregation task failed");
    }
}
