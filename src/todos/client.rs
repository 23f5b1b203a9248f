//! Reqwest-backed client for the JSONPlaceholder API.

use std::time::Duration;
use tracing::debug;

use crate::config::{HttpConfig, TodosConfig};
use crate::error::ApiError;
use crate::http::read_json;
use crate::models::{Todo, User};

/// Client for jsonplaceholder.typicode.com.
pub struct TodoClient {
    client: reqwest::Client,
    base_url: String,
}

impl TodoClient {
    /// Build a client from configuration.
    pub fn new(todos: &TodosConfig, http: &HttpConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(&http.user_agent)
            .timeout(Duration::from_secs(http.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: todos.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch one user by id. Unknown ids surface [`ApiError::NotFound`].
    pub async fn fetch_user(&self, id: u64) -> Result<User, ApiError> {
        let url = format!("{}/users/{}", self.base_url, id);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        read_json(response, &url).await
    }

    /// Fetch every todo belonging to user `id`, in API order.
    ///
    /// The API answers an unknown id here with an empty list rather than a
    /// 404, so callers that need existence checks go through
    /// [`fetch_user`](Self::fetch_user) first.
    pub async fn fetch_todos(&self, id: u64) -> Result<Vec<Todo>, ApiError> {
        let url = format!("{}/todos", self.base_url);
        debug!("GET {}?userId={}", url, id);

        let response = self
            .client
            .get(&url)
            .query(&[("userId", id)])
            .send()
            .await?;
        read_json(response, &url).await
    }

    /// Fetch the full user roster.
    pub async fn fetch_users(&self) -> Result<Vec<User>, ApiError> {
        let url = format!("{}/users", self.base_url);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        read_json(response, &url).await
    }
}
