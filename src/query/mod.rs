pub mod pagination;
pub mod sort;

use crate::core::DerivedGameRecord;

pub use pagination::{clamp_page, pagination_controls, total_pages, visible_pages, PageControl};
pub use sort::{compare_names, sort_records, SortKey};

/// Filter, order and page selection for one render
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParams {
    pub search: String,
    /// `None` keeps the dataset order
    pub sort: Option<SortKey>,
    pub page_size: usize,
    /// Requested 1-based page, clamped by `query`
    pub page: u32,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: Some(SortKey::default()),
            page_size: 24,
            page: 1,
        }
    }
}

/// One page of results
#[derive(Debug, Clone)]
pub struct QueryPage<'a> {
    pub items: Vec<&'a DerivedGameRecord>,
    pub total_pages: u32,
    /// Requested page after clamping
    pub page: u32,
    /// Records matching the search, across all pages
    pub filtered_count: usize,
}

/// Whether a record's name contains `term` (already lowercased)
fn matches(record: &DerivedGameRecord, term: &str) -> bool {
    term.is_empty() || record.name().to_lowercase().contains(term)
}

/// Filter and sort the full set without paging
pub fn filter_and_sort<'a>(
    records: &'a [DerivedGameRecord],
    search: &str,
    sort: Option<SortKey>,
) -> Vec<&'a DerivedGameRecord> {
    let term = search.to_lowercase();
    let mut filtered: Vec<&DerivedGameRecord> = records.iter().filter(|r| matches(r, &term)).collect();

    if sort.is_none() {
        tracing::debug!("Unknown sort key, keeping dataset order");
    }
    sort_records(&mut filtered, sort);
    filtered
}

/// Run a full query: filter, sort, clamp the page and cut the window
pub fn query<'a>(records: &'a [DerivedGameRecord], params: &QueryParams) -> QueryPage<'a> {
    let filtered = filter_and_sort(records, &params.search, params.sort);
    let page_size = params.page_size.max(1);

    let filtered_count = filtered.len();
    let total_pages = total_pages(filtered_count, page_size);
    let page = clamp_page(params.page, total_pages);

    let start = (page as usize - 1) * page_size;
    let items = filtered.into_iter().skip(start).take(page_size).collect();

    QueryPage {
        items,
        total_pages,
        page,
        filtered_count,
    }
}
