use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::ClientError;
use crate::{
    errors::ErrorResponse,
    models::{
        domain::{Quiz, SortOrder},
        dto::{
            request::{CreateQuizRequest, CredentialsRequest, UpdateQuizRequest},
            response::{AuthResponse, MessageResponse, PaginatedResponse},
        },
    },
};

pub const API_URL_VAR: &str = "API_URL";

/// Thin typed wrapper over the REST API. Holds the bearer token, if any.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn from_env() -> Result<Self, ClientError> {
        let base_url = std::env::var(API_URL_VAR).map_err(|_| ClientError::MissingApiUrl)?;
        if base_url.trim().is_empty() {
            return Err(ClientError::MissingApiUrl);
        }
        Ok(Self::new(base_url))
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder.send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.message,
            Err(_) => status.canonical_reason().unwrap_or_default().to_string(),
        };
        log::debug!("API request failed with {}: {}", status, message);

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let body = CredentialsRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        Self::send(self.request(Method::POST, "/auth/register").json(&body)).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let body = CredentialsRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        Self::send(self.request(Method::POST, "/auth/login").json(&body)).await
    }

    pub async fn get_quizzes(
        &self,
        page: i64,
        limit: i64,
        search: &str,
        sort: SortOrder,
    ) -> Result<PaginatedResponse<Quiz>, ClientError> {
        let mut query = vec![
            ("page", page.to_string()),
            ("limit", limit.to_string()),
            ("sort", sort.as_str().to_string()),
        ];
        if !search.is_empty() {
            query.push(("search", search.to_string()));
        }
        Self::send(self.request(Method::GET, "/quizzes").query(&query)).await
    }

    pub async fn get_quiz(&self, id: i64) -> Result<Quiz, ClientError> {
        Self::send(self.request(Method::GET, &format!("/quizzes/{}", id))).await
    }

    pub async fn create_quiz(&self, title: &str, description: &str) -> Result<Quiz, ClientError> {
        let body = CreateQuizRequest {
            title: title.to_string(),
            description: description.to_string(),
        };
        Self::send(self.request(Method::POST, "/quizzes").json(&body)).await
    }

    pub async fn update_quiz(
        &self,
        id: i64,
        changes: &UpdateQuizRequest,
    ) -> Result<Quiz, ClientError> {
        Self::send(self.request(Method::PUT, &format!("/quizzes/{}", id)).json(changes)).await
    }

    pub async fn delete_quiz(&self, id: i64) -> Result<MessageResponse, ClientError> {
        Self::send(self.request(Method::DELETE, &format!("/quizzes/{}", id))).await
    }
}
