//! Trend server implementation
//!
//! This module owns the axum router and the HTTP lifecycle: it wires the
//! API routes together with the static dashboard routes and the optional
//! CORS and request-tracing layers.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::{Error, Result};

use super::api::create_router;

// ============================================================================
// App State
// ============================================================================

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: Arc<Config>,

    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create state from a validated configuration
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }
}

// ============================================================================
// Trend Server
// ============================================================================

/// Main trend server
pub struct TrendServer {
    state: AppState,
}

impl TrendServer {
    /// Create a new trend server
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            state: AppState::new(config),
        })
    }

    /// Get the application state
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        let config = &self.state.config;

        // The original served the same page from two paths; both now point
        // at one configured file.
        let dashboard = ServeFile::new(config.server.static_dir.join("data.html"));

        let mut router = create_router(self.state.clone())
            .route_service("/", dashboard.clone())
            .route_service("/data.html", dashboard);

        // Add CORS layer if enabled
        if config.server.enable_cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        // Add tracing layer if enabled
        if config.server.enable_request_logging {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Start the server
    pub async fn start(&self) -> Result<()> {
        let router = self.build_router();
        let addr = self.state.config.server.bind_address;

        tracing::info!("Starting trend server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Bind { addr, source: e })?;

        axum::serve(listener, router).await.map_err(Error::Serve)?;

        Ok(())
    }

    /// Start with graceful shutdown
    pub async fn start_with_shutdown(
        &self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<()> {
        let router = self.build_router();
        let addr = self.state.config.server.bind_address;

        tracing::info!("Starting trend server on {} (with graceful shutdown)", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Bind { addr, source: e })?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(Error::Serve)?;

        tracing::info!("Trend server shutdown complete");
        Ok(())
    }

    /// Get server info
    pub fn info(&self) -> ServerInfo {
        let config = &self.state.config;

        ServerInfo {
            bind_address: config.server.bind_address,
            csv_path: config.dataset.csv_path.clone(),
            top_tags: config.dataset.top_tags,
            cors_enabled: config.server.enable_cors,
            request_logging_enabled: config.server.enable_request_logging,
        }
    }
}

/// Server information
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub bind_address: SocketAddr,
    pub csv_path: PathBuf,
    pub top_tags: usize,
    pub cors_enabled: bool,
    pub request_logging_enabled: bool,
}

impl ServerInfo {
    /// Format as display string
    pub fn display(&self) -> String {
        format!(
            "Trend Server\n\
             {:-<40}\n\
             Bind Address: {}\n\
             Dataset: {}\n\
             Top Tags: {}\n\
             CORS: {}\n\
             Request Logging: {}",
            "",
            self.bind_address,
            self.csv_path.display(),
            self.top_tags,
            if self.cors_enabled { "enabled" } else { "disabled" },
            if self.request_logging_enabled { "enabled" } else { "disabled" }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
