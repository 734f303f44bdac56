//! tagtrend - Programming Question Tag Trend Service
//!
//! Aggregates a CSV of timestamped programming questions into per-year tag
//! popularity shares and serves the ranked top tags as JSON alongside a
//! static dashboard page.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`dataset`] - CSV dataset loading
//! - [`analytics`] - Tag trend aggregation
//! - [`models`] - Core data structures and types
//! - [`web`] - HTTP server, API routes, and static dashboard
//! - [`error`] - Unified error type
//!
//! # Example
//!
//! ```no_run
//! use tagtrend::config::Config;
//! use tagtrend::web::TrendServer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = TrendServer::new(config)?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod web;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analytics::{aggregate_tag_trends, parse_record_year, DEFAULT_TOP_TAGS};
    pub use crate::config::Config;
    pub use crate::dataset::load_records;
    pub use crate::error::{Error, Result};
    pub use crate::models::{QuestionRecord, TagTrend, TrendPoint, TrendReport};
    pub use crate::web::TrendServer;
}

// Direct re-exports for convenience
pub use models::{QuestionRecord, TagTrend, TrendPoint, TrendReport};
