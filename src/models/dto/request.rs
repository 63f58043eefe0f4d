use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{
    quiz::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    QuizChanges, QuizFilter, SortOrder,
};

/// Body of both `/auth/register` and `/auth/login`.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CredentialsRequest {
    #[validate(length(min = 1, max = 255, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateQuizRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255, message = "Title cannot be empty"))]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,
}

impl From<UpdateQuizRequest> for QuizChanges {
    fn from(request: UpdateQuizRequest) -> Self {
        QuizChanges {
            title: request.title,
            description: request.description,
        }
    }
}

/// Raw listing query. Values stay strings so that junk input falls back to
/// defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuizzesQuery {
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
}

impl ListQuizzesQuery {
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit
            .as_deref()
            .and_then(|l| l.trim().parse::<i64>().ok())
            .filter(|l| *l >= 1)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE)
    }

    pub fn to_filter(&self) -> QuizFilter {
        QuizFilter {
            search: self.search.clone().unwrap_or_default(),
            page: self.page(),
            limit: self.limit(),
            sort: SortOrder::parse(self.sort.as_deref()),
        }
    }
}
