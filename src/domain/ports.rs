use crate::domain::errors::CollectError;
use crate::domain::metrics::{Batch, Credentials, Document};
use async_trait::async_trait;
use url::Url;

/// Source of the JSON document metrics are extracted from
#[async_trait]
pub trait MetricsFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Document, CollectError>;
}

/// Destination a finished batch is delivered to
#[async_trait]
pub trait BatchSender: Send + Sync {
    async fn send(&self, batch: &Batch, credentials: &Credentials) -> Result<(), CollectError>;
}
