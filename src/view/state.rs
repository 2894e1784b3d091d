use crate::query::{QueryParams, SortKey};
use crate::view::mode::ViewMode;
use crate::view::url::UrlState;

/// Everything the user can change about the current view
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub search: String,
    /// `None` when the requested key was not recognised
    pub sort: Option<SortKey>,
    pub page_size: usize,
    pub page: u32,
    pub mode: ViewMode,
}

impl ViewState {
    pub fn new(page_size: usize, mode: ViewMode) -> Self {
        Self {
            search: String::new(),
            sort: Some(SortKey::default()),
            page_size: page_size.max(1),
            page: 1,
            mode,
        }
    }

    /// Seed search and page from startup URL parameters
    pub fn with_url(mut self, url: &UrlState) -> Self {
        if let Some(search) = &url.search {
            self.search = search.clone();
        }
        if let Some(page) = url.page {
            self.page = page;
        }
        self
    }

    pub fn query_params(&self) -> QueryParams {
        QueryParams {
            search: self.search.clone(),
            sort: self.sort,
            page_size: self.page_size,
            page: self.page,
        }
    }

    pub fn url_state(&self) -> UrlState {
        UrlState::from_view(&self.search, self.page)
    }

    /// Apply one user event and report what has to happen next
    pub fn apply(&mut self, event: &ViewEvent) -> Reaction {
        match event {
            ViewEvent::SearchInput(text) => {
                self.search = text.clone();
                Reaction { schedule_debounce: true, ..Reaction::default() }
            }
            ViewEvent::SearchCommit => self.reset_page(),
            ViewEvent::Sort(raw) => {
                self.sort = SortKey::parse(raw);
                if self.sort.is_none() {
                    tracing::debug!("Unknown sort key '{}', leaving order unchanged", raw);
                }
                self.reset_page()
            }
            ViewEvent::PageSize(size) => {
                self.page_size = (*size).max(1);
                self.reset_page()
            }
            ViewEvent::GoToPage(page) => {
                self.page = (*page).max(1);
                Reaction { rerender: true, sync_url: true, ..Reaction::default() }
            }
            ViewEvent::SetView(mode) => {
                self.mode = *mode;
                Reaction { rerender: true, persist_view: true, ..Reaction::default() }
            }
            ViewEvent::Refresh => Reaction { refresh: true, ..Reaction::default() },
        }
    }

    fn reset_page(&mut self) -> Reaction {
        self.page = 1;
        Reaction {
            rerender: true,
            sync_url: true,
            cancel_debounce: true,
            ..Reaction::default()
        }
    }
}

/// Discrete user or timer events
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// Raw keystrokes; only takes effect once the debounce fires
    SearchInput(String),
    /// Debounce fired for the latest search text
    SearchCommit,
    Sort(String),
    PageSize(usize),
    /// Pagination button; sets the page without resetting it
    GoToPage(u32),
    SetView(ViewMode),
    Refresh,
}

/// Follow-up work produced by `ViewState::apply`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reaction {
    pub rerender: bool,
    pub sync_url: bool,
    pub schedule_debounce: bool,
    pub cancel_debounce: bool,
    pub persist_view: bool,
    pub refresh: bool,
}
