pub mod http_client_factory;
pub mod http_fetcher;
pub mod librato;

pub use http_client_factory::HttpClientFactory;
pub use http_fetcher::HttpMetricsFetcher;
pub use librato::LibratoBatchSender;
