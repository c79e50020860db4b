use crate::config::period::parse_duration;
use crate::infrastructure::librato::LIBRATO_METRICS_URL;
use clap::Parser;
use std::time::Duration;

/// Command-line flags. Every flag except the repeatable paths can also come
/// from the environment (or a `.env` file).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Poll a JSON endpoint and forward selected fields to Librato",
    long_about = None
)]
pub struct Cli {
    /// URL of the service's metrics
    #[arg(long, env = "METRICS_URL")]
    pub url: Option<String>,

    /// An optional source to use instead of the URL's host
    #[arg(long, env = "METRICS_SOURCE")]
    pub source: Option<String>,

    /// The JSON path to a gauge's value (repeatable)
    #[arg(long = "gauge", value_name = "PATH")]
    pub gauges: Vec<String>,

    /// The JSON path to a counter's value (repeatable)
    #[arg(long = "counter", value_name = "PATH")]
    pub counters: Vec<String>,

    /// Librato account email
    #[arg(long, env = "LIBRATO_EMAIL", default_value = "")]
    pub email: String,

    /// Librato account token
    #[arg(long, env = "LIBRATO_TOKEN", default_value = "", hide_env_values = true)]
    pub token: String,

    /// Send data periodically (0 for just once), e.g. 30s, 5m, 1h30m
    #[arg(long, env = "POLL_PERIOD", default_value = "0", value_parser = parse_duration)]
    pub period: Duration,

    /// Librato metrics endpoint
    #[arg(long, env = "LIBRATO_API_URL", default_value = LIBRATO_METRICS_URL, hide = true)]
    pub api_url: String,

    /// Per-request HTTP timeout; transport defaults when unset
    #[arg(long, env = "HTTP_TIMEOUT", value_parser = parse_duration)]
    pub timeout: Option<Duration>,
}
