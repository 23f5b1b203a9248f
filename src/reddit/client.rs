//! Reqwest-backed client for the public Reddit JSON API.

use async_trait::async_trait;
use reqwest::redirect::Policy;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::{HttpConfig, RedditConfig};
use crate::error::ApiError;
use crate::http::read_json;
use crate::models::{ListingPage, Post};
use crate::reddit::listing::{ListingSource, PageCursor, MAX_PAGE_SIZE};

/// Wire shape of `GET /r/{sub}/about.json`.
#[derive(Debug, Deserialize)]
struct AboutEnvelope {
    data: AboutData,
}

#[derive(Debug, Deserialize)]
struct AboutData {
    #[serde(default)]
    subscribers: u64,
}

/// Wire shape of `GET /r/{sub}/hot.json`.
#[derive(Debug, Deserialize)]
struct ListingEnvelope {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<ListingChild>,
    #[serde(default)]
    after: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: Post,
}

impl From<ListingEnvelope> for ListingPage {
    fn from(envelope: ListingEnvelope) -> Self {
        ListingPage {
            posts: envelope
                .data
                .children
                .into_iter()
                .map(|child| child.data)
                .collect(),
            after: envelope.data.after,
        }
    }
}

/// Client for www.reddit.com.
///
/// Redirects are disabled on purpose: Reddit answers unknown subreddit
/// names with a redirect to its search page, and following it would turn
/// a not-found into a malformed-body error.
pub struct RedditClient {
    client: reqwest::Client,
    base_url: String,
    page_size: u32,
}

impl RedditClient {
    /// Build a client from configuration.
    pub fn new(reddit: &RedditConfig, http: &HttpConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(&http.user_agent)
            .timeout(Duration::from_secs(http.timeout_seconds))
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            client,
            base_url: reddit.base_url.trim_end_matches('/').to_string(),
            page_size: reddit.page_size.clamp(1, MAX_PAGE_SIZE),
        })
    }

    /// Subscriber count of `subreddit`, from `about.json`.
    pub async fn subscribers(&self, subreddit: &str) -> Result<u64, ApiError> {
        let url = format!("{}/r/{}/about.json", self.base_url, subreddit);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let about: AboutEnvelope = read_json(response, &url).await?;
        Ok(about.data.subscribers)
    }
}

#[async_trait]
impl ListingSource for RedditClient {
    async fn hot_page(
        &self,
        subreddit: &str,
        cursor: &PageCursor,
        limit: u32,
    ) -> Result<ListingPage, ApiError> {
        let url = format!("{}/r/{}/hot.json", self.base_url, subreddit);

        let mut query: Vec<(&str, String)> = vec![("limit", limit.to_string())];
        if let Some(after) = &cursor.after {
            query.push(("after", after.clone()));
            query.push(("count", cursor.seen.to_string()));
        }
        debug!("GET {} page {}", url, cursor.requests + 1);

        let response = self.client.get(&url).query(&query).send().await?;
        let envelope: ListingEnvelope = read_json(response, &url).await?;
        Ok(envelope.into())
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_envelope_decodes_and_flattens() {
        let body = r#"{
            "kind": "Listing",
            "data": {
                "after": "t3_abc",
                "dist": 2,
                "children": [
                    {"kind": "t3", "data": {"title": "first", "ups": 10}},
                    {"kind": "t3", "data": {"title": "second", "ups": 3}}
                ]
            }
        }"#;

        let envelope: ListingEnvelope = serde_json::from_str(body).unwrap();
        let page = ListingPage::from(envelope);

        assert_eq!(page.after, Some("t3_abc".to_string()));
        assert_eq!(page.posts.len(), 2);
        assert_eq!(page.posts[0].title, "first");
        assert_eq!(page.posts[1].title, "second");
    }

    #[test]
    fn test_listing_envelope_final_page_has_no_cursor() {
        let body = r#"{"data": {"after": null, "children": []}}"#;
        let envelope: ListingEnvelope = serde_json::from_str(body).unwrap();
        let page = ListingPage::from(envelope);

        assert_eq!(page.after, None);
        assert!(page.posts.is_empty());
    }

    #[test]
    fn test_about_envelope_decodes_subscribers() {
        let body = r#"{"kind": "t5", "data": {"display_name": "rust", "subscribers": 312456}}"#;
        let about: AboutEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(about.data.subscribers, 312456);
    }

    #[test]
    fn test_client_clamps_configured_page_size() {
        let reddit = RedditConfig {
            page_size: 5000,
            ..RedditConfig::default()
        };
        let client = RedditClient::new(&reddit, &HttpConfig::default()).unwrap();
        assert_eq!(client.page_size(), MAX_PAGE_SIZE);
    }
}
