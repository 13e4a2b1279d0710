//! The Sequel Committee (tsc) - Main entry point
//!
//! Reads a franchise catalog, finds each franchise's peak, fall and best
//! streak, and writes the results to the output directory.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tsc_cli::{execute, Args};
use tsc_core::config::{load_config, LoggingConfig};

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let file_layer = match &logging.file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };
    let stderr_layer = logging
        .file
        .is_none()
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logging settings live in the config file, so it is read first
    let mut config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    args.apply_to(&mut config);
    init_tracing(&config.logging)?;

    info!(
        "Starting The Sequel Committee (tsc) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let report = execute(&args, &config)?;
    info!(
        "[Done] {} franchises from {} of {} items; {} files written to {}",
        report.franchises,
        report.items_analyzed,
        report.items_loaded,
        report.written.len(),
        args.out_dir.display()
    );
    Ok(())
}
