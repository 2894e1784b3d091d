use async_trait::async_trait;
use chrono::{Duration, Utc};
use compactgui_catalog::{
    cache::DatasetCache,
    core::parse_dataset,
    error::CatalogError,
    providers::{DatasetSource, FallbackLoader, FetchOutcome, SourceOrigin},
    storage::{KeyValueStore, SqliteStore},
    view::Reaction,
    CatalogApp, CatalogConfig, CompressionAlgorithm, LoadOutcome, RawGameRecord, RenderFormat,
    ViewEvent, ViewMode,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// In-process dataset source with a call counter
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

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatasetSource for StubSource {
    async fn fetch(&self) -> compactgui_catalog::Result<Vec<RawGameRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.records.clone().ok_or_else(|| {
            CatalogError::source_failure(self.name, format!("{} unreachable", self.name))
        })
    }

    fn location(&self) -> &str {
        self.name
    }
}

fn games() -> Vec<RawGameRecord> {
    vec![
        RawGameRecord::new("1", "Zeta").with_result(CompressionAlgorithm::Xpress4k, 1000, 500),
        RawGameRecord::new("2", "Alpha"),
    ]
}

async fn setup_app(
    primary: Arc<StubSource>,
    fallback: Arc<StubSource>,
) -> (CatalogApp, Arc<SqliteStore>) {
    let store = Arc::new(SqliteStore::new(":memory:").await.unwrap());
    let app = CatalogApp::with_parts(
        FallbackLoader::new(primary, fallback),
        store.clone(),
        &CatalogConfig::default(),
    )
    .await
    .unwrap();
    (app, store)
}

async fn seed_cache(store: Arc<SqliteStore>, age: Duration) {
    let cache = DatasetCache::new(store, Duration::hours(24));
    cache.write(&games(), Utc::now() - age).await.unwrap();
}

#[tokio::test]
async fn test_worked_example() {
    let json = r#"[
        {"SteamID": 1, "GameName": "Zeta", "CompressionResults": [{"CompType": 0, "BeforeBytes": 1000, "AfterBytes": 500}]},
        {"SteamID": 2, "GameName": "Alpha", "CompressionResults": []}
    ]"#;
    let primary = StubSource::ok("primary", parse_dataset(json).unwrap());
    let (mut app, _) = setup_app(primary, StubSource::failing("fallback")).await;

    app.load().await.unwrap();
    app.handle(ViewEvent::Sort("name_asc".to_string())).await.unwrap();

    let names: Vec<String> = app.state().derived.iter().map(|d| d.name().to_string()).collect();
    assert_eq!(names, vec!["Zeta", "Alpha"]); // derived keeps dataset order

    let mut state = app.state().clone();
    let page = state.current_page();
    let ordered: Vec<&str> = page.items.iter().map(|r| r.name()).collect();
    assert_eq!(ordered, vec!["Alpha", "Zeta"]);

    let zeta = &app.state().derived[0];
    assert_eq!(zeta.result(CompressionAlgorithm::Xpress4k).unwrap().savings, 50.0);
}

#[tokio::test]
async fn test_fresh_cache_skips_network() {
    let primary = StubSource::ok("primary", vec![]);
    let (mut app, store) = setup_app(primary.clone(), StubSource::failing("fallback")).await;
    seed_cache(store, Duration::hours(1)).await;

    assert_eq!(app.load().await.unwrap(), LoadOutcome::Cache);
    assert_eq!(primary.calls(), 0);
    assert_eq!(app.state().dataset.len(), 2);
}

#[tokio::test]
async fn test_stale_cache_triggers_fetch() {
    let primary = StubSource::ok("primary", vec![RawGameRecord::new("9", "Fresh")]);
    let (mut app, store) = setup_app(primary.clone(), StubSource::failing("fallback")).await;
    seed_cache(store, Duration::hours(25)).await;

    assert_eq!(app.load().await.unwrap(), LoadOutcome::Fetched(SourceOrigin::Primary));
    assert_eq!(primary.calls(), 1);
    assert_eq!(app.state().dataset[0].game_name, "Fresh");
}

#[tokio::test]
async fn test_fallback_success_is_silent_and_cached() {
    let primary = StubSource::failing("primary");
    let fallback = StubSource::ok("fallback", games());
    let (mut app, store) = setup_app(primary, fallback.clone()).await;

    assert_eq!(app.load().await.unwrap(), LoadOutcome::Fetched(SourceOrigin::Fallback));
    assert!(app.state().status.is_none());

    let cache = DatasetCache::new(store, Duration::hours(24));
    assert_eq!(cache.read_fresh(Utc::now()).await.unwrap().unwrap().len(), 2);

    // second load is served from cache
    app.load().await.unwrap();
    assert_eq!(fallback.calls(), 1);
}

#[tokio::test]
async fn test_total_failure_reports_both_sources() {
    let (mut app, _) = setup_app(StubSource::failing("primary"), StubSource::failing("fallback")).await;

    assert_eq!(app.load().await.unwrap(), LoadOutcome::Failed);
    let status = app.state().status.clone().unwrap();
    assert!(status.contains("primary unreachable"));
    assert!(status.contains("fallback unreachable"));
    assert!(app.state().dataset.is_empty());
}

#[tokio::test]
async fn test_total_failure_falls_back_to_stale_cache() {
    let (mut app, store) = setup_app(StubSource::failing("primary"), StubSource::failing("fallback")).await;
    seed_cache(store, Duration::hours(30)).await;

    assert_eq!(app.load().await.unwrap(), LoadOutcome::StaleCache);
    assert_eq!(app.state().dataset.len(), 2);
    assert!(app.state().status.is_some());
}

#[tokio::test]
async fn test_failed_refresh_keeps_current_data() {
    let primary = StubSource::ok("primary", games());
    let (mut app, _) = setup_app(primary, StubSource::failing("fallback")).await;
    app.load().await.unwrap();

    let broken = CatalogError::source_failure("primary", "offline");
    let token = app.begin_refresh();
    let outcome = app.finish_refresh(token, Err(broken)).await.unwrap();
    assert_eq!(outcome, LoadOutcome::Failed);
    assert_eq!(app.state().dataset.len(), 2);
}

#[tokio::test]
async fn test_superseded_refresh_is_discarded() {
    let (mut app, _) = setup_app(StubSource::ok("primary", vec![]), StubSource::failing("fallback")).await;

    let first = app.begin_refresh();
    let second = app.begin_refresh();

    let old = FetchOutcome { dataset: games(), origin: SourceOrigin::Primary, location: "primary".to_string() };
    assert_eq!(app.finish_refresh(first, Ok(old)).await.unwrap(), LoadOutcome::Discarded);
    assert!(app.state().dataset.is_empty());

    let new = FetchOutcome {
        dataset: vec![RawGameRecord::new("5", "Newest")],
        origin: SourceOrigin::Primary,
        location: "primary".to_string(),
    };
    assert_eq!(
        app.finish_refresh(second, Ok(new)).await.unwrap(),
        LoadOutcome::Fetched(SourceOrigin::Primary)
    );
    assert_eq!(app.state().dataset[0].game_name, "Newest");
}

#[tokio::test]
async fn test_view_mode_persists_across_sessions() {
    let store = Arc::new(SqliteStore::new(":memory:").await.unwrap());
    let config = CatalogConfig::default();

    let mut first = CatalogApp::with_parts(
        FallbackLoader::new(StubSource::ok("p", games()), StubSource::failing("f")),
        store.clone(),
        &config,
    )
    .await
    .unwrap();
    assert_eq!(first.view().mode, ViewMode::Grid);
    first.handle(ViewEvent::SetView(ViewMode::Compact)).await.unwrap();
    assert_eq!(store.get("compactGuiViewMode").await.unwrap().as_deref(), Some("compact"));

    let second = CatalogApp::with_parts(
        FallbackLoader::new(StubSource::ok("p", games()), StubSource::failing("f")),
        store,
        &config,
    )
    .await
    .unwrap();
    assert_eq!(second.view().mode, ViewMode::Compact);
}

#[tokio::test]
async fn test_url_round_trip_and_page_reset() {
    let many: Vec<RawGameRecord> = (0..60).map(|i| RawGameRecord::new(i.to_string(), format!("Game {:02}", i))).collect();
    let (mut app, _) = setup_app(StubSource::ok("primary", many), StubSource::failing("fallback")).await;
    app.load().await.unwrap();

    app.apply_url(&compactgui_catalog::view::UrlState::parse("?search=game&page=2"));
    let html = app.render(RenderFormat::Html);
    assert!(html.contains("Game 24"));
    assert!(html.contains("class=\"page-btn active\" data-page=\"2\""));
    assert_eq!(app.url(), "?search=game&page=2");

    app.handle(ViewEvent::Sort("size_desc".to_string())).await.unwrap();
    assert_eq!(app.view().page, 1);
    assert_eq!(app.url(), "?search=game");

    // out-of-range page is clamped on render
    app.handle(ViewEvent::GoToPage(99)).await.unwrap();
    app.render(RenderFormat::Text);
    assert_eq!(app.view().page, 3);
    assert_eq!(app.url(), "?search=game&page=3");
}

/// Store whose every operation fails, like a locked or unreadable database
struct BrokenStore;

#[async_trait]
impl KeyValueStore for BrokenStore {
    async fn get(&self, _key: &str) -> compactgui_catalog::Result<Option<String>> {
        Err(CatalogError::Cache("database is locked".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> compactgui_catalog::Result<()> {
        Err(CatalogError::Cache("database is locked".to_string()))
    }

    async fn remove(&self, _key: &str) -> compactgui_catalog::Result<bool> {
        Err(CatalogError::Cache("database is locked".to_string()))
    }
}

#[tokio::test]
async fn test_store_errors_are_not_fatal() {
    let mut app = CatalogApp::with_parts(
        FallbackLoader::new(StubSource::failing("primary"), StubSource::failing("fallback")),
        Arc::new(BrokenStore),
        &CatalogConfig::default(),
    )
    .await
    .unwrap();
    assert_eq!(app.view().mode, ViewMode::Grid);

    // both sources down and the stale-cache lookup fails too
    assert_eq!(app.load().await.unwrap(), LoadOutcome::Failed);
    assert!(app.state().status.as_deref().unwrap().contains("primary unreachable"));

    let reaction: Reaction = app.handle(ViewEvent::SetView(ViewMode::List)).await.unwrap();
    assert!(reaction.persist_view);
    assert_eq!(app.view().mode, ViewMode::List);
    assert!(app.state().status.as_deref().unwrap().contains("Could not save view mode"));
}

#[tokio::test]
async fn test_store_errors_keep_fetched_data() {
    let mut app = CatalogApp::with_parts(
        FallbackLoader::new(StubSource::ok("primary", games()), StubSource::failing("fallback")),
        Arc::new(BrokenStore),
        &CatalogConfig::default(),
    )
    .await
    .unwrap();

    // cache read and write both fail; the fetched data is still shown
    assert_eq!(app.load().await.unwrap(), LoadOutcome::Fetched(SourceOrigin::Primary));
    assert_eq!(app.state().dataset.len(), 2);
}
