use crate::application::batch_builder::BatchBuilder;
use crate::config::Config;
use crate::domain::errors::CollectError;
use crate::domain::metrics::{Credentials, MetricPath};
use crate::domain::ports::{BatchSender, MetricsFetcher};
use crate::infrastructure::http_client_factory::HttpClientFactory;
use crate::infrastructure::http_fetcher::HttpMetricsFetcher;
use crate::infrastructure::librato::LibratoBatchSender;
use std::sync::Arc;
use url::Url;

/// What to collect on every cycle
#[derive(Debug, Clone)]
pub struct CollectionPlan {
    pub url: Url,
    pub source: String,
    pub gauges: Vec<MetricPath>,
    pub counters: Vec<MetricPath>,
    pub credentials: Credentials,
}

impl From<&Config> for CollectionPlan {
    fn from(config: &Config) -> Self {
        Self {
            url: config.url.clone(),
            source: config.source.clone(),
            gauges: config.gauges.clone(),
            counters: config.counters.clone(),
            credentials: config.credentials.clone(),
        }
    }
}

/// Runs one fetch -> build -> send cycle.
///
/// Holds no per-cycle state: every call fetches a fresh document and builds a
/// fresh batch.
pub struct Collector {
    fetcher: Arc<dyn MetricsFetcher>,
    sender: Arc<dyn BatchSender>,
    plan: CollectionPlan,
}

impl Collector {
    pub fn new(
        fetcher: Arc<dyn MetricsFetcher>,
        sender: Arc<dyn BatchSender>,
        plan: CollectionPlan,
    ) -> Self {
        Self {
            fetcher,
            sender,
            plan,
        }
    }

    /// Wire the HTTP fetcher and the Librato sender from configuration
    pub fn from_config(config: &Config) -> Result<Self, CollectError> {
        let client = HttpClientFactory::create_client(config.timeout)?;
        let fetcher = Arc::new(HttpMetricsFetcher::new(client.clone()));
        let sender = Arc::new(LibratoBatchSender::new(client, config.api_url.clone()));

        Ok(Self::new(fetcher, sender, CollectionPlan::from(config)))
    }

    pub fn plan(&self) -> &CollectionPlan {
        &self.plan
    }

    /// Returns the number of metrics sent
    pub async fn run_once(&self) -> Result<usize, CollectError> {
        let plan = &self.plan;

        let document = self.fetcher.fetch(&plan.url).await?;
        let batch = BatchBuilder::build(&document, &plan.source, &plan.gauges, &plan.counters)?;
        self.sender.send(&batch, &plan.credentials).await?;

        Ok(batch.len())
    }
}
