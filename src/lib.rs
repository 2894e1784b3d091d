//! # CompactGUI Catalog
//!
//! Browser for the CompactGUI compression database:
//! - Fetch with a single fallback hop (primary CDN, then GitHub mirror)
//! - Single-slot SQLite cache with a 24h freshness window
//! - Per-algorithm savings (XPRESS 4K/8K/16K, LZX)
//! - Filtering, multi-key sorting and pagination
//! - HTML (grid, list, compact) and terminal rendering
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use compactgui_catalog::{CatalogApp, CatalogConfig, RenderFormat, ViewEvent};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut app = CatalogApp::new(&CatalogConfig::default()).await?;
//!     app.load().await?;
//!
//!     app.handle(ViewEvent::Sort("lzx_ratio_desc".to_string())).await?;
//!     println!("{}", app.render(RenderFormat::Text));
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod cache;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod providers;
pub mod query;
pub mod render;
pub mod storage;
pub mod view;

// Re-export primary types
pub use app::{AppState, CatalogApp, LoadOutcome};
pub use cache::DatasetCache;
pub use config::CatalogConfig;
pub use crate::core::{derive_all, CompressionAlgorithm, DerivedGameRecord, RawGameRecord};
pub use error::{CatalogError, Result};
pub use query::{query, QueryPage, QueryParams, SortKey};
pub use render::RenderFormat;
pub use view::{ViewEvent, ViewMode, ViewState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
