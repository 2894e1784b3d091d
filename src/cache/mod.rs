//! Single-slot dataset cache with a freshness window.
//!
//! The envelope is two store entries: the dataset JSON and the epoch
//! millisecond timestamp of the fetch that produced it.

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;

use crate::core::{parse_dataset, RawGameRecord};
use crate::error::Result;
use crate::storage::KeyValueStore;

pub const CACHE_KEY: &str = "compactGuiData";
pub const CACHE_TIMESTAMP_KEY: &str = "compactGuiTimestamp";

/// Cached dataset with the time it was stored
#[derive(Debug, Clone)]
pub struct CachedDataset {
    pub dataset: Vec<RawGameRecord>,
    pub cached_at: DateTime<Utc>,
}

impl CachedDataset {
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.cached_at
    }
}

/// Cache summary for the CLI
#[derive(Debug, Clone)]
pub struct CacheInfo {
    pub present: bool,
    pub cached_at: Option<DateTime<Utc>>,
    pub age: Option<Duration>,
    pub fresh: bool,
    pub records: usize,
}

/// Dataset cache over a key/value store
pub struct DatasetCache {
    store: Arc<dyn KeyValueStore>,
    max_age: Duration,
}

impl DatasetCache {
    pub fn new(store: Arc<dyn KeyValueStore>, max_age: Duration) -> Self {
        Self { store, max_age }
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Whether an entry stored at `cached_at` is still fresh at `now`
    pub fn is_fresh(&self, cached_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - cached_at < self.max_age
    }

    /// Stored dataset regardless of age; unreadable data counts as absent
    pub async fn read_any(&self) -> Result<Option<CachedDataset>> {
        let data = self.store.get(CACHE_KEY).await?;
        let timestamp = self.store.get(CACHE_TIMESTAMP_KEY).await?;

        let (Some(data), Some(timestamp)) = (data, timestamp) else {
            return Ok(None);
        };

        let cached_at = match timestamp.trim().parse::<i64>().ok().and_then(|ms| Utc.timestamp_millis_opt(ms).single()) {
            Some(at) => at,
            None => {
                tracing::warn!("Failed to parse cache timestamp '{}'", timestamp);
                return Ok(None);
            }
        };

        match parse_dataset(&data) {
            Ok(dataset) => Ok(Some(CachedDataset { dataset, cached_at })),
            Err(e) => {
                tracing::warn!("Failed to parse cached data: {}", e);
                Ok(None)
            }
        }
    }

    /// Stored dataset only when it is younger than the freshness window
    pub async fn read_fresh(&self, now: DateTime<Utc>) -> Result<Option<Vec<RawGameRecord>>> {
        match self.read_any().await? {
            Some(cached) if self.is_fresh(cached.cached_at, now) => {
                tracing::info!("Loading data from cache ({} records)", cached.dataset.len());
                Ok(Some(cached.dataset))
            }
            Some(cached) => {
                tracing::info!(
                    "Cache is stale ({} minutes old)",
                    cached.age(now).num_minutes()
                );
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Overwrite the envelope with `dataset` stamped at `now`
    pub async fn write(&self, dataset: &[RawGameRecord], now: DateTime<Utc>) -> Result<()> {
        let json = serde_json::to_string(dataset)?;
        self.store.set(CACHE_KEY, &json).await?;
        self.store
            .set(CACHE_TIMESTAMP_KEY, &now.timestamp_millis().to_string())
            .await?;
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        self.store.remove(CACHE_KEY).await?;
        self.store.remove(CACHE_TIMESTAMP_KEY).await?;
        Ok(())
    }

    pub async fn info(&self, now: DateTime<Utc>) -> Result<CacheInfo> {
        Ok(match self.read_any().await? {
            Some(cached) => CacheInfo {
                present: true,
                cached_at: Some(cached.cached_at),
                age: Some(cached.age(now)),
                fresh: self.is_fresh(cached.cached_at, now),
                records: cached.dataset.len(),
            },
            None => CacheInfo {
                present: false,
                cached_at: None,
                age: None,
                fresh: false,
                records: 0,
            },
        })
    }
}
