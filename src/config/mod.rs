//! Configuration for the poller.
//!
//! Flags are parsed by [`Cli`] (with environment fallbacks) and validated into
//! a [`Config`] before any network I/O happens.

mod cli;
mod period;

pub use cli::Cli;
pub use period::{DurationParseError, parse_duration};

use crate::domain::errors::CollectError;
use crate::domain::metrics::{Credentials, MetricPath};
use std::time::Duration;
use url::Url;

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub url: Url,
    pub source: String,
    pub gauges: Vec<MetricPath>,
    pub counters: Vec<MetricPath>,
    pub credentials: Credentials,
    /// Zero means collect once and exit
    pub period: Duration,
    pub api_url: Url,
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, CollectError> {
        let raw_url = cli
            .url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| CollectError::Config("No URL provided".to_string()))?;
        let url = parse_http_url(&raw_url, "metrics URL")?;
        let api_url = parse_http_url(&cli.api_url, "API URL")?;

        let source = match cli.source.filter(|s| !s.is_empty()) {
            Some(source) => source,
            None => default_source(&url)?,
        };

        let gauges = parse_paths(&cli.gauges)?;
        let counters = parse_paths(&cli.counters)?;

        Ok(Self {
            url,
            source,
            gauges,
            counters,
            credentials: Credentials::new(cli.email, cli.token),
            period: cli.period,
            api_url,
            timeout: cli.timeout,
        })
    }

    pub fn is_periodic(&self) -> bool {
        !self.period.is_zero()
    }
}

fn parse_http_url(raw: &str, what: &str) -> Result<Url, CollectError> {
    let url = Url::parse(raw)
        .map_err(|e| CollectError::Config(format!("Invalid {} '{}': {}", what, raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(CollectError::Config(format!(
            "Invalid {} '{}': unsupported scheme '{}'",
            what, raw, other
        ))),
    }
}

/// The URL's host, with the port when one is given explicitly
fn default_source(url: &Url) -> Result<String, CollectError> {
    let host = url
        .host_str()
        .ok_or_else(|| CollectError::Config(format!("URL '{}' has no host", url)))?;

    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

fn parse_paths(raw: &[String]) -> Result<Vec<MetricPath>, CollectError> {
    raw.iter().map(|p| p.parse()).collect()
}
