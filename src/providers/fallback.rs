use std::sync::Arc;

use crate::core::RawGameRecord;
use crate::error::{CatalogError, Result};
use crate::providers::DatasetSource;

/// Which source produced a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOrigin {
    Primary,
    Fallback,
}

/// A successfully fetched dataset and where it came from
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub dataset: Vec<RawGameRecord>,
    pub origin: SourceOrigin,
    pub location: String,
}

/// Two-attempt loader: primary first, then the fallback mirror once.
///
/// Sources are awaited one after the other. There is no retry beyond the
/// single fallback hop.
pub struct FallbackLoader {
    primary: Arc<dyn DatasetSource>,
    fallback: Arc<dyn DatasetSource>,
}

impl FallbackLoader {
    pub fn new(primary: Arc<dyn DatasetSource>, fallback: Arc<dyn DatasetSource>) -> Self {
        Self { primary, fallback }
    }

    /// Fetch the dataset, failing only when both sources fail
    pub async fn fetch_dataset(&self) -> Result<FetchOutcome> {
        let primary_error = match self.primary.fetch().await {
            Ok(dataset) => {
                return Ok(FetchOutcome {
                    dataset,
                    origin: SourceOrigin::Primary,
                    location: self.primary.location().to_string(),
                });
            }
            Err(e) => e,
        };

        tracing::warn!("Primary database fetch failed, trying fallback: {}", primary_error);

        match self.fallback.fetch().await {
            Ok(dataset) => {
                tracing::info!("Loaded database from fallback source {}", self.fallback.location());
                Ok(FetchOutcome {
                    dataset,
                    origin: SourceOrigin::Fallback,
                    location: self.fallback.location().to_string(),
                })
            }
            Err(fallback_error) => {
                tracing::error!("Fallback database fetch failed: {}", fallback_error);
                Err(CatalogError::AggregatedFetch {
                    primary: Box::new(primary_error),
                    fallback: Box::new(fallback_error),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubSource {
        name: &'static str,
        records: Option<Vec<RawGameRecord>>,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn ok(name: &'static str, records: Vec<RawGameRecord>) -> Arc<Self> {
            Arc::new(Self { name, records: Some(records), calls: AtomicUsize::new(0) })
        }

        fn failing(name: &'static str) -> Arc<Self> {
            Arc::new(Self { name, records: None, calls: AtomicUsize::new(0) })
        }
    }

    #[async_trait]
    impl DatasetSource for StubSource {
        async fn fetch(&self) -> Result<Vec<RawGameRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.records
                .clone()
                .ok_or_else(|| CatalogError::source_failure(self.name, "HTTP error! status: 503"))
        }

        fn location(&self) -> &str {
            self.name
        }
    }

    #[tokio::test]
    async fn test_primary_success_skips_fallback() {
        let primary = StubSource::ok("primary", vec![RawGameRecord::new("1", "A")]);
        let fallback = StubSource::ok("fallback", vec![]);
        let loader = FallbackLoader::new(primary.clone(), fallback.clone());

        let outcome = loader.fetch_dataset().await.unwrap();
        assert_eq!(outcome.origin, SourceOrigin::Primary);
        assert_eq!(outcome.dataset.len(), 1);
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_primary_failure_uses_fallback() {
        let primary = StubSource::failing("primary");
        let fallback = StubSource::ok("fallback", vec![RawGameRecord::new("2", "B")]);
        let loader = FallbackLoader::new(primary.clone(), fallback.clone());

        let outcome = loader.fetch_dataset().await.unwrap();
        assert_eq!(outcome.origin, SourceOrigin::Fallback);
        assert_eq!(outcome.location, "fallback");
        assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_both_failures_are_aggregated() {
        let loader = FallbackLoader::new(StubSource::failing("primary"), StubSource::failing("fallback"));

        match loader.fetch_dataset().await.unwrap_err() {
            CatalogError::AggregatedFetch { primary, fallback } => {
                assert!(primary.to_string().contains("primary"));
                assert!(fallback.to_string().contains("fallback"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
