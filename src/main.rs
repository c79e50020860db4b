//! json2librato - poll a JSON endpoint and forward selected fields to Librato
//!
//! # Usage
//! ```sh
//! json2librato --url http://localhost:8080/debug/vars \
//!     --gauge memstats.HeapAlloc --counter memstats.NumGC \
//!     --email ops@example.com --token $TOKEN --period 1m
//! ```
//!
//! # Environment Variables
//! - `METRICS_URL`, `METRICS_SOURCE` - what to poll and how to label it
//! - `LIBRATO_EMAIL`, `LIBRATO_TOKEN` - API credentials
//! - `POLL_PERIOD` - interval between collections (default: 0, collect once)
//! - `RUST_LOG` - log filter (default: info)

use anyhow::Context;
use clap::Parser;
use json2librato::application::collector::Collector;
use json2librato::application::scheduler::CollectionScheduler;
use json2librato::config::{Cli, Config};
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    let config = match Config::from_cli(Cli::parse()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run with --help for usage.");
            return Ok(ExitCode::from(2));
        }
    };

    info!(
        "json2librato {} starting: source={}, gauges={}, counters={}",
        env!("CARGO_PKG_VERSION"),
        config.source,
        config.gauges.len(),
        config.counters.len()
    );

    let collector = Collector::from_config(&config).context("Failed to set up collector")?;

    let scheduler = CollectionScheduler::new(collector, config.period);
    let tally = scheduler
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;

    if !config.is_periodic() && tally.failed > 0 {
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
