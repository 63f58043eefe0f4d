use reqwest::Url;
use tokio::sync::mpsc::UnboundedReceiver;

use super::{
    debounce::{Debouncer, SEARCH_DEBOUNCE},
    form::SubmitGuard,
    query::{self, DashboardQuery, DASHBOARD_PAGE_SIZE},
    ApiClient, Notice,
};
use crate::models::domain::{Quiz, SortOrder};

pub const FETCH_FAILED: &str = "Failed to fetch quizzes";
pub const DELETE_FAILED: &str = "Failed to delete quiz";
pub const DELETE_SUCCEEDED: &str = "Quiz deleted successfully";
pub const DELETE_IN_PROGRESS: &str = "A deletion is already in progress";

/// The quiz list screen. Its query lives in `location`; the quiz list is
/// whatever the last successful fetch returned.
pub struct Dashboard {
    location: Url,
    quizzes: Vec<Quiz>,
    total_pages: i64,
    search: Debouncer<String>,
    deleting: SubmitGuard,
}

impl Dashboard {
    /// The returned receiver yields settled search input; feed each value to
    /// [`Dashboard::apply_search`].
    pub fn new(location: Url) -> (Self, UnboundedReceiver<String>) {
        let (search, settled) = Debouncer::new(SEARCH_DEBOUNCE);
        (
            Self {
                location,
                quizzes: Vec::new(),
                total_pages: 1,
                search,
                deleting: SubmitGuard::new(),
            },
            settled,
        )
    }

    pub fn query(&self) -> DashboardQuery {
        DashboardQuery::from_url(&self.location)
    }

    pub fn quizzes(&self) -> &[Quiz] {
        &self.quizzes
    }

    pub fn total_pages(&self) -> i64 {
        self.total_pages
    }

    /// Loads the page described by the current location.
    pub async fn refresh(&mut self, api: &ApiClient) -> Result<(), Notice> {
        let query = self.query();
        match api
            .get_quizzes(query.page, DASHBOARD_PAGE_SIZE, &query.search, query.sort)
            .await
        {
            Ok(page) => {
                self.quizzes = page.data;
                self.total_pages = page.pagination.total_pages;
                Ok(())
            }
            Err(e) => {
                log::warn!("Quiz list fetch failed: {}", e);
                Err(Notice::error(e.user_message(FETCH_FAILED)))
            }
        }
    }

    pub fn go_to_page(&mut self, page: i64) {
        self.location = query::with_page(&self.location, page.max(1));
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.location = query::with_sort(&self.location, sort);
    }

    /// Records a keystroke in the search box and re-arms the debounce timer.
    pub fn type_search(&mut self, value: &str) {
        self.search.push(value.to_string());
    }

    /// Applies a settled search value. Returns whether the location changed
    /// and a refresh is due.
    pub fn apply_search(&mut self, settled: &str) -> bool {
        match query::sync_search(&self.location, settled) {
            Some(next) => {
                self.location = next;
                true
            }
            None => false,
        }
    }

    pub async fn delete(&mut self, api: &ApiClient, id: i64) -> Notice {
        let Some(_ticket) = self.deleting.try_begin() else {
            return Notice::error(DELETE_IN_PROGRESS);
        };

        match api.delete_quiz(id).await {
            Ok(_) => {
                if let Err(notice) = self.refresh(api).await {
                    return notice;
                }
                Notice::success(DELETE_SUCCEEDED)
            }
            Err(e) => Notice::error(e.user_message(DELETE_FAILED)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard(location: &str) -> Dashboard {
        Dashboard::new(Url::parse(location).unwrap()).0
    }

    #[actix_web::test]
    async fn test_initial_state_from_location() {
        let dashboard = dashboard("app://quizdesk/dashboard?search=math&page=2");
        assert_eq!(dashboard.query().search, "math");
        assert_eq!(dashboard.query().page, 2);
        assert!(dashboard.quizzes().is_empty());
    }

    #[actix_web::test]
    async fn test_page_and_sort_rewrite_location() {
        let mut dashboard = dashboard("app://quizdesk/dashboard");
        dashboard.go_to_page(3);
        dashboard.set_sort(SortOrder::Asc);

        let query = dashboard.query();
        assert_eq!(query.page, 3);
        assert_eq!(query.sort, SortOrder::Asc);
    }

    #[actix_web::test]
    async fn test_apply_search_resets_page_once() {
        let mut dashboard = dashboard("app://quizdesk/dashboard?page=4");
        assert!(dashboard.apply_search("math"));
        assert_eq!(dashboard.query().page, 1);
        assert_eq!(dashboard.query().search, "math");

        assert!(!dashboard.apply_search("math"));
    }

    #[actix_web::test]
    async fn test_failed_fetch_uses_fallback() {
        let mut dashboard = dashboard("app://quizdesk/dashboard");
        // Nothing listens on the discard port.
        let api = ApiClient::new("http://127.0.0.1:9/api");

        let notice = dashboard.refresh(&api).await.unwrap_err();
        assert_eq!(notice, Notice::error(FETCH_FAILED));
        assert!(dashboard.quizzes().is_empty());
    }

    #[actix_web::test]
    async fn test_delete_refused_while_busy() {
        let mut dashboard = dashboard("app://quizdesk/dashboard");
        let api = ApiClient::new("http://127.0.0.1:9/api");

        let _ticket = dashboard.deleting.try_begin().unwrap();
        let notice = dashboard.delete(&api, 1).await;
        assert_eq!(notice, Notice::error(DELETE_IN_PROGRESS));
    }
}
