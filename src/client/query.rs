use reqwest::Url;

use crate::models::domain::SortOrder;

/// Quizzes shown per dashboard page.
pub const DASHBOARD_PAGE_SIZE: i64 = 6;

/// Dashboard state, read entirely from the location's query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardQuery {
    pub page: i64,
    pub search: String,
    pub sort: SortOrder,
}

fn param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

impl DashboardQuery {
    pub fn from_url(url: &Url) -> Self {
        let page = param(url, "page")
            .and_then(|p| p.parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);

        Self {
            page,
            search: param(url, "search").unwrap_or_default(),
            sort: SortOrder::parse(param(url, "sort").as_deref()),
        }
    }
}

/// Rebuilds the query string of `url`, letting `edit` change the parameter list.
fn rewrite(url: &Url, edit: impl FnOnce(&mut Vec<(String, String)>)) -> Url {
    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    edit(&mut pairs);

    let mut next = url.clone();
    if pairs.is_empty() {
        next.set_query(None);
    } else {
        next.query_pairs_mut().clear().extend_pairs(pairs);
    }
    next
}

fn set(pairs: &mut Vec<(String, String)>, key: &str, value: String) {
    match pairs.iter_mut().find(|(k, _)| k == key) {
        Some(pair) => pair.1 = value,
        None => pairs.push((key.to_string(), value)),
    }
}

fn remove(pairs: &mut Vec<(String, String)>, key: &str) {
    pairs.retain(|(k, _)| k != key);
}

pub fn with_page(url: &Url, page: i64) -> Url {
    rewrite(url, |pairs| set(pairs, "page", page.to_string()))
}

pub fn with_sort(url: &Url, sort: SortOrder) -> Url {
    rewrite(url, |pairs| set(pairs, "sort", sort.as_str().to_string()))
}

/// Applies a settled search value. Returns `None` when the location already
/// carries it; otherwise the search is set (or removed when empty) and the
/// page is reset.
pub fn sync_search(url: &Url, debounced: &str) -> Option<Url> {
    let current = param(url, "search").unwrap_or_default();
    if current == debounced {
        return None;
    }

    Some(rewrite(url, |pairs| {
        if debounced.is_empty() {
            remove(pairs, "search");
        } else {
            set(pairs, "search", debounced.to_string());
        }
        remove(pairs, "page");
    }))
}
