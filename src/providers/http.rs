use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::core::RawGameRecord;
use crate::error::{CatalogError, Result};
use crate::providers::DatasetSource;

/// Database mirror reachable over HTTP(S)
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    /// Create a source with its own client
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CatalogError::HttpRequest)?;

        Ok(Self::with_client(client, url))
    }

    /// Share one client between several sources
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<RawGameRecord>> {
        let response = self.client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CatalogError::source_failure(&self.url, format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(CatalogError::source_failure(
                &self.url,
                format!("HTTP error! status: {}", response.status()),
            ));
        }

        let records: Vec<RawGameRecord> = response
            .json()
            .await
            .map_err(|e| CatalogError::source_failure(&self.url, format!("Invalid JSON: {}", e)))?;

        tracing::debug!("Fetched {} records from {}", records.len(), self.url);
        Ok(records)
    }

    fn location(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PRIMARY_URL;

    #[test]
    fn test_location() {
        let source = HttpSource::new(PRIMARY_URL, Duration::from_secs(5)).unwrap();
        assert_eq!(source.location(), PRIMARY_URL);
    }

    #[tokio::test]
    async fn test_unreachable_source_fails() {
        let source = HttpSource::new("http://127.0.0.1:9/database.json", Duration::from_millis(500)).unwrap();
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, CatalogError::Source { .. }));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_fetch_primary() {
        let source = HttpSource::new(PRIMARY_URL, Duration::from_secs(10)).unwrap();
        let records = source.fetch().await.unwrap();
        assert!(!records.is_empty());
    }
}
