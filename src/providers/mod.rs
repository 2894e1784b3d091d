pub mod fallback;
pub mod http;

use async_trait::async_trait;
use crate::core::RawGameRecord;
use crate::error::Result;

pub use fallback::{FallbackLoader, FetchOutcome, SourceOrigin};
pub use http::HttpSource;

/// Trait for places the compression database can be fetched from
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Fetch and decode the full dataset
    async fn fetch(&self) -> Result<Vec<RawGameRecord>>;

    /// Location shown in logs (usually the URL)
    fn location(&self) -> &str;
}
