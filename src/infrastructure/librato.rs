//! Librato metrics API client.
//!
//! Posts a [`Batch`] to `/v1/metrics` with basic auth. One attempt per batch;
//! anything but `200 OK` is reported back with the response body.

use crate::domain::errors::{CollectError, Stage};
use crate::domain::metrics::{Batch, Credentials};
use crate::domain::ports::BatchSender;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

pub const LIBRATO_METRICS_URL: &str = "https://metrics-api.librato.com/v1/metrics";

/// `Basic` authorization header value.
///
/// Encoded with the URL-safe base64 alphabet (padded), which is what the
/// Librato collectors have always sent. It differs from RFC 7617's standard
/// alphabet whenever the encoding contains `+` or `/`.
pub fn basic_auth(credentials: &Credentials) -> String {
    let raw = format!("{}:{}", credentials.identity, credentials.secret);
    format!("Basic {}", URL_SAFE.encode(raw.as_bytes()))
}

pub struct LibratoBatchSender {
    client: Client,
    endpoint: Url,
}

impl LibratoBatchSender {
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl BatchSender for LibratoBatchSender {
    async fn send(&self, batch: &Batch, credentials: &Credentials) -> Result<(), CollectError> {
        let payload = serde_json::to_vec(batch).map_err(CollectError::Encode)?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, basic_auth(credentials))
            .body(payload)
            .send()
            .await
            .map_err(|source| CollectError::Network {
                stage: Stage::Send,
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| CollectError::Network {
            stage: Stage::Send,
            source,
        })?;

        if status != StatusCode::OK {
            return Err(CollectError::HttpStatus {
                stage: Stage::Send,
                status,
                body,
            });
        }

        debug!("Librato accepted {} metrics for {}", batch.len(), batch.source);
        Ok(())
    }
}
