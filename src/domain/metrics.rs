//! Core metric types shared by the resolver, the batch builder and the sender.

use crate::domain::errors::CollectError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Root object of a fetched metrics document
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Numeric kind a path must resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Gauge,
    Counter,
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gauge => write!(f, "number"),
            Self::Counter => write!(f, "integer"),
        }
    }
}

/// A resolved leaf value, already coerced to its kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Gauge(f64),
    Counter(i64),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gauge(v) => write!(f, "{}", v),
            Self::Counter(v) => write!(f, "{}", v),
        }
    }
}

/// Dotted path into a document, e.g. `memory.used`.
///
/// Segments are split purely on `.`; a key that itself contains a dot can't be
/// addressed. The original string is kept as the metric name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricPath {
    raw: String,
    segments: Vec<String>,
}

impl MetricPath {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Never empty
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl FromStr for MetricPath {
    type Err = CollectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(CollectError::Config("metric path is empty".to_string()));
        }

        let segments: Vec<String> = s.split('.').map(str::to_string).collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(CollectError::Config(format!(
                "metric path '{}' contains an empty segment",
                s
            )));
        }

        Ok(Self {
            raw: s.to_string(),
            segments,
        })
    }
}

impl fmt::Display for MetricPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gauge {
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    pub value: i64,
}

/// One transmission worth of metrics.
///
/// Serializes to exactly `{"gauges": .., "counters": .., "source": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub gauges: BTreeMap<String, Gauge>,
    pub counters: BTreeMap<String, Counter>,
    pub source: String,
}

impl Batch {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            gauges: BTreeMap::new(),
            counters: BTreeMap::new(),
            source: source.into(),
        }
    }

    /// Number of distinct metrics in the batch
    pub fn len(&self) -> usize {
        self.gauges.len() + self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Basic-auth identity and secret for the metrics API
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub identity: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(identity: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identity", &self.identity)
            .field("secret", &"<redacted>")
            .finish()
    }
}
