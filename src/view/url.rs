//! Shareable query-string state.
//!
//! Only `search` and `page` live in the URL; everything else is either
//! persisted (view mode) or defaulted.

/// Parsed `?search=...&page=...` parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlState {
    pub search: Option<String>,
    pub page: Option<u32>,
}

impl UrlState {
    /// Parse a query string, with or without the leading `?`.
    ///
    /// Unknown keys are ignored. A `page` that is not a positive integer is
    /// dropped, as is an empty `search`.
    pub fn parse(query: &str) -> Self {
        let mut state = UrlState::default();

        let query = query.trim_start_matches('?');
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let mut kv = pair.splitn(2, '=');
            let key = kv.next().unwrap_or("");
            let value = decode(kv.next().unwrap_or(""));
            match key {
                "search" if !value.is_empty() => state.search = Some(value),
                "page" => state.page = value.trim().parse::<u32>().ok().filter(|p| *p > 0),
                _ => {}
            }
        }

        state
    }

    /// Build from live view values, omitting defaults
    pub fn from_view(search: &str, page: u32) -> Self {
        let search = search.trim();
        Self {
            search: (!search.is_empty()).then(|| search.to_string()),
            page: (page > 1).then_some(page),
        }
    }

    /// Serialize to `?search=...&page=...`, or an empty string when both are unset
    pub fn to_query_string(&self) -> String {
        let mut parts = Vec::new();
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            parts.push(format!("search={}", urlencoding::encode(search)));
        }
        if let Some(page) = self.page.filter(|p| *p > 1) {
            parts.push(format!("page={}", page));
        }

        if parts.is_empty() {
            String::new()
        } else {
            format!("?{}", parts.join("&"))
        }
    }
}

fn decode(value: &str) -> String {
    let value = value.replace('+', " ");
    match urlencoding::decode(&value) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => value,
    }
}
