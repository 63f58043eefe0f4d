//! Client-side application layer: session, API access and the state behind the
//! dashboard and quiz editor screens.

pub mod api;
pub mod auth;
pub mod dashboard;
pub mod debounce;
pub mod editor;
pub mod form;
pub mod query;
pub mod session;

pub use api::ApiClient;
pub use dashboard::Dashboard;
pub use debounce::Debouncer;
pub use editor::QuizEditor;
pub use form::{QuizForm, SubmitGuard};
pub use query::DashboardQuery;
pub use session::{Session, SessionState, SessionStore};

use thiserror::Error;

/// Transient message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice::Success(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice::Error(message.into())
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("API_URL is not set")]
    MissingApiUrl,

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Session data error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// The server's message when it sent one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = ClientError::Api {
            status: 400,
            message: "Username already exists".to_string(),
        };
        assert_eq!(err.user_message("Registration failed"), "Username already exists");
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = ClientError::Api {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.user_message("Failed to fetch quizzes"), "Failed to fetch quizzes");

        let err = ClientError::MissingApiUrl;
        assert_eq!(err.user_message("Failed to save quiz"), "Failed to save quiz");
    }
}
