use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{CatalogError, Result};
use crate::storage::KeyValueStore;

pub const VIEW_MODE_KEY: &str = "compactGuiViewMode";

/// Presentation layout for the result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Cover cards in a grid
    #[default]
    Grid,
    /// The same cards, one per row
    List,
    /// Dense table with one column per algorithm
    Compact,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Grid, ViewMode::List, ViewMode::Compact];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
            ViewMode::Compact => "compact",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            "compact" => Ok(ViewMode::Compact),
            other => Err(CatalogError::Other(format!("Unknown view mode: {}", other))),
        }
    }
}

/// Persists the selected view mode across sessions
pub struct ViewModeStore {
    store: Arc<dyn KeyValueStore>,
}

impl ViewModeStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored mode, `Grid` when unset or unrecognised
    pub async fn load(&self) -> Result<ViewMode> {
        let stored = self.store.get(VIEW_MODE_KEY).await?;
        Ok(match stored {
            Some(value) => value.parse().unwrap_or_else(|e| {
                tracing::warn!("Ignoring stored view mode: {}", e);
                ViewMode::default()
            }),
            None => ViewMode::default(),
        })
    }

    pub async fn save(&self, mode: ViewMode) -> Result<()> {
        self.store.set(VIEW_MODE_KEY, mode.as_str()).await
    }
}
