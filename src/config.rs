//! Runtime configuration.
//!
//! Defaults point at the public CompactGUI database mirrors. Every value can
//! be overridden from the environment (`COMPACTGUI_*`) or a string map.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::error::{CatalogError, Result};

pub const PRIMARY_URL: &str =
    "https://rawcdn.githack.com/IridiumIO/CompactGUI/a8a8869ce61e200d542f090d47fab5b0107f0233/database.json";
pub const FALLBACK_URL: &str =
    "https://raw.githubusercontent.com/IridiumIO/CompactGUI/refs/heads/database/database.json";

/// Page sizes offered to the user
pub const PAGE_SIZE_CHOICES: [usize; 4] = [12, 24, 48, 96];

/// Catalog configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Primary database URL
    pub primary_url: String,

    /// Mirror tried once when the primary fails
    pub fallback_url: String,

    /// SQLite file backing the local store (`:memory:` allowed)
    pub db_path: String,

    /// Cached data older than this is stale
    pub cache_hours: u64,

    /// Default page size
    pub page_size: usize,

    /// Quiet period before a search keystroke triggers a query
    pub debounce_ms: u64,

    /// Per-request HTTP timeout
    pub http_timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            primary_url: PRIMARY_URL.to_string(),
            fallback_url: FALLBACK_URL.to_string(),
            db_path: "compactgui.db".to_string(),
            cache_hours: 24,
            page_size: 24,
            debounce_ms: 300,
            http_timeout_secs: 10,
        }
    }
}

impl CatalogConfig {
    /// Read overrides from `COMPACTGUI_*` environment variables
    pub fn from_env() -> Result<Self> {
        let vars: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with("COMPACTGUI_"))
            .collect();
        Self::from_map(&vars)
    }

    /// Build from a key/value map, falling back to defaults for missing keys
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            primary_url: vars
                .get("COMPACTGUI_PRIMARY_URL")
                .cloned()
                .unwrap_or(defaults.primary_url),
            fallback_url: vars
                .get("COMPACTGUI_FALLBACK_URL")
                .cloned()
                .unwrap_or(defaults.fallback_url),
            db_path: vars
                .get("COMPACTGUI_DB")
                .cloned()
                .unwrap_or(defaults.db_path),
            cache_hours: parse_var(vars, "COMPACTGUI_CACHE_HOURS")?.unwrap_or(defaults.cache_hours),
            page_size: parse_var(vars, "COMPACTGUI_PAGE_SIZE")?.unwrap_or(defaults.page_size),
            debounce_ms: parse_var(vars, "COMPACTGUI_DEBOUNCE_MS")?.unwrap_or(defaults.debounce_ms),
            http_timeout_secs: parse_var(vars, "COMPACTGUI_HTTP_TIMEOUT_SECS")?
                .unwrap_or(defaults.http_timeout_secs),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(CatalogError::Config("page_size must be at least 1".to_string()));
        }
        if self.cache_hours == 0 {
            return Err(CatalogError::Config("cache_hours must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn cache_duration(&self) -> chrono::Duration {
        chrono::Duration::hours(self.cache_hours as i64)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn parse_var<T: std::str::FromStr>(vars: &HashMap<String, String>, key: &str) -> Result<Option<T>> {
    match vars.get(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| CatalogError::Config(format!("{} has invalid value '{}'", key, raw))),
    }
}

impl fmt::Display for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "db={}, cache={}h, page_size={}, debounce={}ms, timeout={}s",
            self.db_path, self.cache_hours, self.page_size, self.debounce_ms, self.http_timeout_secs
        )
    }
}
