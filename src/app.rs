use chrono::Utc;
use std::sync::Arc;

use crate::cache::{CacheInfo, DatasetCache};
use crate::config::CatalogConfig;
use crate::core::{derive_all, DerivedGameRecord, RawGameRecord};
use crate::error::{CatalogError, Result};
use crate::providers::{DatasetSource, FallbackLoader, FetchOutcome, HttpSource, SourceOrigin};
use crate::query::{query, QueryPage};
use crate::render::{render, RenderFormat};
use crate::storage::{KeyValueStore, SqliteStore};
use crate::view::{Reaction, UrlState, ViewEvent, ViewMode, ViewModeStore, ViewState};

/// Where the data currently on screen came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Fresh cache, no network
    Cache,
    /// Network fetch from the given source
    Fetched(SourceOrigin),
    /// Both sources failed; an expired cached copy is shown instead
    StaleCache,
    /// Both sources failed and nothing new is shown
    Failed,
    /// A newer refresh started before this one finished
    Discarded,
}

/// Explicit application state, mutated only by `CatalogApp`
#[derive(Debug, Clone)]
pub struct AppState {
    pub dataset: Vec<RawGameRecord>,
    pub derived: Vec<DerivedGameRecord>,
    pub view: ViewState,
    /// User-visible status line, set on failures
    pub status: Option<String>,
    generation: u64,
}

impl AppState {
    pub fn new(view: ViewState) -> Self {
        Self {
            dataset: Vec::new(),
            derived: Vec::new(),
            view,
            status: None,
            generation: 0,
        }
    }

    /// Replace the dataset wholesale and recompute derived records
    pub fn set_dataset(&mut self, dataset: Vec<RawGameRecord>) {
        self.derived = derive_all(&dataset);
        self.dataset = dataset;
    }

    /// Start a refresh and return its token
    pub fn begin_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn is_current(&self, token: u64) -> bool {
        token == self.generation
    }

    /// Current page, clamping the stored page number into range
    pub fn current_page(&mut self) -> QueryPage<'_> {
        let page = query(&self.derived, &self.view.query_params());
        self.view.page = page.page;
        page
    }
}

/// Catalog orchestrator: loader → cache → transform → query/render
pub struct CatalogApp {
    loader: FallbackLoader,
    cache: DatasetCache,
    view_modes: ViewModeStore,
    state: AppState,
}

impl CatalogApp {
    /// Build with HTTP sources and an SQLite store from `config`
    pub async fn new(config: &CatalogConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .build()
            .map_err(CatalogError::HttpRequest)?;
        let primary: Arc<dyn DatasetSource> = Arc::new(HttpSource::with_client(client.clone(), &config.primary_url));
        let fallback: Arc<dyn DatasetSource> = Arc::new(HttpSource::with_client(client, &config.fallback_url));

        let store = Arc::new(SqliteStore::new(&config.db_path).await?);
        tracing::debug!("Opened store at {}", config.db_path);

        Self::with_parts(FallbackLoader::new(primary, fallback), store, config).await
    }

    /// Build from explicit parts
    pub async fn with_parts(
        loader: FallbackLoader,
        store: Arc<dyn KeyValueStore>,
        config: &CatalogConfig,
    ) -> Result<Self> {
        let view_modes = ViewModeStore::new(store.clone());
        let mode = view_modes.load().await.unwrap_or_else(|e| {
            tracing::warn!("Failed to read saved view mode: {}", e);
            ViewMode::default()
        });

        Ok(Self {
            loader,
            cache: DatasetCache::new(store, config.cache_duration()),
            view_modes,
            state: AppState::new(ViewState::new(config.page_size, mode)),
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> &ViewState {
        &self.state.view
    }

    /// Seed search and page from the startup URL
    pub fn apply_url(&mut self, url: &UrlState) {
        self.state.view = self.state.view.clone().with_url(url);
    }

    /// Switch layout for this session only, without persisting it
    pub fn preview_mode(&mut self, mode: ViewMode) {
        self.state.view.mode = mode;
    }

    /// Serialized URL query for the current view
    pub fn url(&self) -> String {
        self.state.view.url_state().to_query_string()
    }

    /// Load from a fresh cache, otherwise fetch
    pub async fn load(&mut self) -> Result<LoadOutcome> {
        match self.cache.read_fresh(Utc::now()).await {
            Ok(Some(dataset)) => {
                self.state.set_dataset(dataset);
                self.state.status = None;
                return Ok(LoadOutcome::Cache);
            }
            Ok(None) => tracing::info!("Cache is old or missing, fetching new data"),
            Err(e) => tracing::warn!("Cache read failed, fetching new data: {}", e),
        }
        self.refresh().await
    }

    /// Mark a new refresh as the latest; older in-flight results get discarded
    pub fn begin_refresh(&mut self) -> u64 {
        self.state.begin_refresh()
    }

    /// Fetch from the network regardless of cache age
    pub async fn refresh(&mut self) -> Result<LoadOutcome> {
        let token = self.begin_refresh();
        let result = self.loader.fetch_dataset().await;
        self.finish_refresh(token, result).await
    }

    /// Apply a fetch result if `token` is still the latest refresh
    pub async fn finish_refresh(&mut self, token: u64, result: Result<FetchOutcome>) -> Result<LoadOutcome> {
        if !self.state.is_current(token) {
            tracing::debug!("Discarding result of superseded refresh #{}", token);
            return Ok(LoadOutcome::Discarded);
        }

        match result {
            Ok(outcome) => {
                if outcome.origin == SourceOrigin::Fallback {
                    tracing::info!("Caching fallback data source for offline use");
                }
                if let Err(e) = self.cache.write(&outcome.dataset, Utc::now()).await {
                    tracing::warn!("Failed to write cache: {}", e);
                }
                tracing::info!("Loaded {} games from {}", outcome.dataset.len(), outcome.location);
                self.state.set_dataset(outcome.dataset);
                self.state.status = None;
                Ok(LoadOutcome::Fetched(outcome.origin))
            }
            Err(e) => {
                tracing::error!("Fetch error: {}", e);
                self.state.status = Some(format!("Failed to fetch new data: {}", e));

                if !self.state.dataset.is_empty() {
                    return Ok(LoadOutcome::Failed);
                }
                match self.cache.read_any().await {
                    Ok(Some(stale)) => {
                        tracing::warn!("Showing cached data from {}", stale.cached_at.to_rfc3339());
                        self.state.set_dataset(stale.dataset);
                        Ok(LoadOutcome::StaleCache)
                    }
                    Ok(None) => Ok(LoadOutcome::Failed),
                    Err(cache_err) => {
                        tracing::warn!("Cache read failed: {}", cache_err);
                        Ok(LoadOutcome::Failed)
                    }
                }
            }
        }
    }

    /// Handle one user or timer event
    pub async fn handle(&mut self, event: ViewEvent) -> Result<Reaction> {
        let reaction = self.state.view.apply(&event);

        if reaction.persist_view {
            if let Err(e) = self.view_modes.save(self.state.view.mode).await {
                tracing::warn!("Failed to save view mode: {}", e);
                self.state.status = Some(format!("Could not save view mode: {}", e));
            }
        }
        if reaction.refresh {
            self.refresh().await?;
        }

        Ok(reaction)
    }

    /// Render the current page with pagination
    pub fn render(&mut self, format: RenderFormat) -> String {
        let mode = self.state.view.mode;
        let page = self.state.current_page();
        render(&page, mode, format)
    }

    pub async fn cache_info(&self) -> Result<CacheInfo> {
        self.cache.info(Utc::now()).await
    }

    pub async fn clear_cache(&self) -> Result<()> {
        self.cache.clear().await
    }
}
