use crate::domain::metrics::MetricKind;
use reqwest::StatusCode;
use thiserror::Error;

/// Which leg of a collection cycle an HTTP error happened on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Send,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Fetch => write!(f, "fetch"),
            Stage::Send => write!(f, "send"),
        }
    }
}

/// Errors that abort a collection cycle
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Network error during {stage}: {source}")]
    Network {
        stage: Stage,
        #[source]
        source: reqwest::Error,
    },

    #[error("{stage} received {status}\n\n{body}")]
    HttpStatus {
        stage: Stage,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to decode metrics document: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to encode batch: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Path not found: {path}")]
    PathNotFound { path: String },

    #[error("Type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: MetricKind,
        found: String,
    },
}

impl CollectError {
    /// HTTP status of a rejected request, if that is what failed
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CollectError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
