//! Pure Storyblok content delivery API client.
//!
//! A minimal client for the Storyblok CDN API. Supports listing stories,
//! optionally filtered by slug prefix, with a preview token (draft content).
//!
//! # Example
//!
//! ```rust,ignore
//! use storyblok_client::{StoriesQuery, StoryblokClient};
//!
//! let client = StoryblokClient::new("preview-token".into(), "12345".into());
//!
//! let stories = client.list_stories(&StoriesQuery::starts_with("en/blog")).await?;
//! for story in &stories {
//!     println!("{}", story.full_slug().unwrap_or("(no slug)"));
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{Result, StoryblokError};
pub use types::{StoriesQuery, StoriesResponse, Story};

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.storyblok.com/v2";

/// `draft` pairs with a preview token; a public token only sees `published`.
pub const DEFAULT_VERSION: &str = "draft";

pub struct StoryblokClient {
    client: reqwest::Client,
    token: String,
    space_id: String,
    base_url: String,
    version: String,
}

impl StoryblokClient {
    pub fn new(token: String, space_id: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            space_id,
            base_url: DEFAULT_BASE_URL.to_string(),
            version: DEFAULT_VERSION.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Content version to request (`draft` or `published`).
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoryblokError::Config(e.to_string()))?;
        Ok(self)
    }

    /// List stories, optionally restricted to a slug prefix.
    pub async fn list_stories(&self, query: &StoriesQuery) -> Result<Vec<Story>> {
        let url = format!("{}/cdn/stories", self.base_url);

        let mut params: Vec<(&str, &str)> = vec![
            ("version", self.version.as_str()),
            ("token", self.token.as_str()),
            ("space_id", self.space_id.as_str()),
        ];
        if let Some(prefix) = query.starts_with.as_deref() {
            params.push(("starts_with", prefix));
        }

        let resp = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| StoryblokError::Network(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Storyblok API call failed");
            let message = if body.trim().is_empty() {
                "Storyblok API call failed".to_string()
            } else {
                body
            };
            return Err(StoryblokError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = resp
            .text()
            .await
            .map_err(|e| StoryblokError::Network(e.without_url().to_string()))?;

        let listing: StoriesResponse =
            serde_json::from_str(&text).map_err(|e| StoryblokError::Parse {
                message: e.to_string(),
                body: text.clone(),
            })?;

        tracing::debug!(
            space_id = %self.space_id,
            starts_with = query.starts_with.as_deref().unwrap_or(""),
            count = listing.stories.len(),
            "Fetched Storyblok stories"
        );

        Ok(listing.stories)
    }
}
