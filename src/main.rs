use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tagtrend::analytics::aggregate_tag_trends;
use tagtrend::config::Config;
use tagtrend::dataset;
use tagtrend::web::{TrendResponse, TrendServer};

#[derive(Parser)]
#[command(
    name = "tagtrend",
    version,
    about = "Programming question tag trend dashboard and aggregation service",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the trend API and the dashboard page
    Serve {
        /// Configuration file path (defaults to ./config.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the bind address
        #[arg(short, long)]
        bind: Option<SocketAddr>,

        /// Override the dataset CSV path
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Aggregate a dataset once and print the report as JSON
    Trends {
        /// Dataset CSV path (defaults to the configured sample dataset)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// How many top tags to keep
        #[arg(short, long, default_value = "10")]
        top: usize,

        /// Pretty-print the JSON output
        #[arg(long, default_value = "false")]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    setup_tracing(&cli.log_format, cli.verbose)?;

    tracing::info!("tagtrend starting");

    match cli.command {
        Commands::Serve { config, bind, csv } => {
            tracing::info!(
                config = ?config,
                bind = ?bind,
                csv = ?csv,
                "Starting serve command"
            );
            serve(config, bind, csv).await?;
        }

        Commands::Trends { input, top, pretty } => {
            tracing::info!(
                input = ?input,
                top = %top,
                "Starting trends command"
            );
            trends(input, top, pretty).await?;
        }
    }

    tracing::info!("tagtrend completed successfully");
    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("tagtrend=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("tagtrend=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

/// Resolve the configuration: explicit file, then ./config.toml, then env
fn load_config(path: Option<&Path>) -> tagtrend::error::Result<Config> {
    match path {
        Some(path) => Config::from_file(path),
        None => {
            let default_path = Path::new("config.toml");
            if default_path.exists() {
                Config::from_file(default_path)
            } else {
                Config::from_env()
            }
        }
    }
}

async fn serve(
    config_path: Option<PathBuf>,
    bind: Option<SocketAddr>,
    csv: Option<PathBuf>,
) -> Result<()> {
    let mut config =
        load_config(config_path.as_deref()).context("Failed to load configuration")?;

    if let Some(bind) = bind {
        config.server.bind_address = bind;
    }
    if let Some(csv) = csv {
        config.dataset.csv_path = csv;
    }

    println!("Starting Trend Server");
    println!("=====================");
    println!("  Bind Address: {}", config.server.bind_address);
    println!("  Dataset: {}", config.dataset.csv_path.display());
    println!("  Top Tags: {}", config.dataset.top_tags);
    println!();

    // A missing dataset is not fatal at startup; /data reports 404 until
    // the file appears.
    if config.dataset.csv_path.exists() {
        tracing::info!("Dataset found at {}", config.dataset.csv_path.display());
    } else {
        tracing::warn!(
            "Dataset not found at {}; /data will return 404 until it appears",
            config.dataset.csv_path.display()
        );
    }

    let bind_address = config.server.bind_address;
    let server = TrendServer::new(config).context("Failed to create trend server")?;

    println!("{}", server.info().display());
    println!();
    println!("Endpoints:");
    println!("  GET  /            - Dashboard page");
    println!("  GET  /data.html   - Dashboard page");
    println!("  GET  /data        - Ranked tag trend report");
    println!("  GET  /api/health  - Health check");
    println!();
    println!("Trend server listening on http://{bind_address}");
    println!("Press Ctrl+C to stop.\n");

    // Start with graceful shutdown
    server
        .start_with_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Shutdown signal received");
                }
                Err(e) => {
                    tracing::error!("Failed to wait for Ctrl+C: {}", e);
                }
            }
        })
        .await?;

    println!("Trend server stopped.");
    Ok(())
}

async fn trends(input: Option<PathBuf>, top: usize, pretty: bool) -> Result<()> {
    let mut config = Config::default();
    if let Some(input) = input {
        config.dataset.csv_path = input;
    }

    let csv_path = config.dataset.csv_path.clone();
    let records = dataset::load_records(&csv_path)
        .with_context(|| format!("Failed to load dataset {}", csv_path.display()))?;

    let report = aggregate_tag_trends(&records, top);
    let response = TrendResponse::from_report(report, &config.dataset.tag_colors);

    let json = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{json}");

    Ok(())
}
