use thiserror::Error;

/// Main error type for the catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// HTTP request errors
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A single dataset source failed
    #[error("Source '{source_name}' error: {message}")]
    Source { source_name: String, message: String },

    /// Both the primary and the fallback source failed
    #[error("Failed to fetch database from both primary and fallback sources (primary: {primary}; fallback: {fallback})")]
    AggregatedFetch {
        primary: Box<CatalogError>,
        fallback: Box<CatalogError>,
    },

    /// Cache errors
    #[error("Cache error: {0}")]
    Cache(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl CatalogError {
    /// Build a source error for the named source
    pub fn source_failure(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::Source {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}

impl From<String> for CatalogError {
    fn from(s: String) -> Self {
        CatalogError::Other(s)
    }
}

impl From<&str> for CatalogError {
    fn from(s: &str) -> Self {
        CatalogError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CatalogError>;
