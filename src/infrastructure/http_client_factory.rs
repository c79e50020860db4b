use crate::domain::errors::CollectError;
use reqwest::Client;
use std::time::Duration;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates the HTTP client shared by the fetcher and the sender.
    ///
    /// No retry layer: a failed request fails the cycle. Without `timeout`
    /// the transport defaults apply.
    pub fn create_client(timeout: Option<Duration>) -> Result<Client, CollectError> {
        let mut builder = Client::builder().pool_max_idle_per_host(2);

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        builder
            .build()
            .map_err(|e| CollectError::Config(format!("Failed to build HTTP client: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_with_and_without_timeout() {
        assert!(HttpClientFactory::create_client(None).is_ok());
        assert!(HttpClientFactory::create_client(Some(Duration::from_secs(5))).is_ok());
    }
}
