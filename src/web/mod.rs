//! Web server module
//!
//! HTTP surface of the tagtrend service: the `/data` aggregation endpoint,
//! the health check, and the static dashboard routes, served by axum.
//!
//! # Components
//!
//! - [`server`]: `TrendServer` owning the router and the HTTP lifecycle
//! - [`api`]: route table, handlers, and JSON response types

pub mod api;
pub mod server;

pub use api::{create_router, ErrorResponse, HealthResponse, SeriesPoint, TagSeries, TrendResponse};
pub use server::{AppState, ServerInfo, TrendServer};
