//! REST API handlers for the trend server
//!
//! This module defines the API routes, the handlers, and the JSON response
//! types for the `/data` and `/api/health` endpoints.

use std::collections::HashMap;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::analytics::aggregate_tag_trends;
use crate::dataset;
use crate::error::Error;
use crate::models::TrendReport;

use super::server::AppState;

// ============================================================================
// API Response Types
// ============================================================================

/// Ranked tag series payload for `GET /data`
#[derive(Debug, Serialize)]
pub struct TrendResponse {
    /// Top tags in rank order (largest cumulative share first)
    pub tags: Vec<TagSeries>,

    /// Input rows read from the dataset
    pub scanned_rows: usize,

    /// Rows excluded for an unparseable timestamp or a missing tag
    pub dropped_rows: usize,
}

/// One ranked tag with its chart color and yearly series
#[derive(Debug, Serialize)]
pub struct TagSeries {
    pub tag: String,

    /// Configured hex color; null for tags outside the color table
    pub color: Option<String>,

    /// Yearly shares in ascending year order
    pub series: Vec<SeriesPoint>,
}

/// One year's percentage share for a tag
#[derive(Debug, Serialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub value: f64,
}

impl TrendResponse {
    /// Attach configured colors to a finished report.
    ///
    /// Color lookup is a presentation concern; the aggregator itself never
    /// sees the color table.
    pub fn from_report(report: TrendReport, colors: &HashMap<String, String>) -> Self {
        Self {
            scanned_rows: report.scanned_rows,
            dropped_rows: report.dropped_rows,
            tags: report
                .tags
                .into_iter()
                .map(|trend| TagSeries {
                    color: colors.get(&trend.tag).cloned(),
                    series: trend
                        .series
                        .iter()
                        .map(|point| SeriesPoint {
                            year: point.year,
                            value: point.value,
                        })
                        .collect(),
                    tag: trend.tag,
                })
                .collect(),
        }
    }
}

/// Simple error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

// ============================================================================
// API Routes
// ============================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/data", get(get_trends))
        .route("/api/health", get(health_check))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = state.start_time.elapsed().as_secs();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: uptime,
    })
}

/// Load the dataset, aggregate it, and return the ranked tag series
async fn get_trends(State(state): State<AppState>) -> axum::response::Response {
    let config = state.config.clone();

    // CSV reading is synchronous I/O; keep it off the async workers. The
    // dataset is reloaded per request, so edits to the file show up on the
    // next refresh without a restart.
    let result = tokio::task::spawn_blocking(move || {
        let records = dataset::load_records(&config.dataset.csv_path)?;
        Ok::<_, Error>(aggregate_tag_trends(&records, config.dataset.top_tags))
    })
    .await;

    let report = match result {
        Ok(Ok(report)) => report,
        Ok(Err(e)) if e.is_not_found() => {
            tracing::warn!(error = %e, "Dataset missing");
            return (StatusCode::NOT_FOUND, Json(ErrorResponse::new(e.to_string())))
                .into_response();
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Trend aggregation failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Trend aggregation task panicked");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("trend aggregation task failed")),
            )
                .into_response();
        }
    };

    let colors = &state.config.dataset.tag_colors;
    (StatusCode::OK, Json(TrendResponse::from_report(report, colors))).into_response()
}

// ============================================================================
// Tests
// ============================================================================
