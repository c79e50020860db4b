use crate::domain::errors::{CollectError, Stage};
use crate::domain::metrics::Document;
use crate::domain::ports::MetricsFetcher;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

/// Fetches the metrics document with a plain GET
pub struct HttpMetricsFetcher {
    client: Client,
}

impl HttpMetricsFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MetricsFetcher for HttpMetricsFetcher {
    async fn fetch(&self, url: &Url) -> Result<Document, CollectError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| CollectError::Network {
                stage: Stage::Fetch,
                source,
            })?;

        let status = response.status();
        // Read the whole body up front so the connection is released whatever the outcome
        let body = response.bytes().await.map_err(|source| CollectError::Network {
            stage: Stage::Fetch,
            source,
        })?;
        debug!("Fetched {} bytes from {} ({})", body.len(), url, status);

        if status != StatusCode::OK {
            return Err(CollectError::HttpStatus {
                stage: Stage::Fetch,
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        serde_json::from_slice::<Document>(&body).map_err(CollectError::Decode)
    }
}
