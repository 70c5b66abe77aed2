use serde::{Deserialize, Serialize};
use serde_json::Value;
use storyblok_client::Story;

/// Inbound content request (`POST` body or `GET` query).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// What the caller asked for, after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentLookup {
    /// First story whose slug starts with the given prefix.
    Single(String),
    /// Every story in the space.
    All,
}

impl ContentRequest {
    /// `POST` always means single mode, so a URL is required.
    pub fn into_single(self) -> Result<ContentLookup, String> {
        match self.into_lookup() {
            ContentLookup::All => Err("URL is required.".to_string()),
            single => Ok(single),
        }
    }

    /// `GET` falls back to list mode when no URL is given.
    pub fn into_lookup(self) -> ContentLookup {
        match self.url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
            Some(url) => ContentLookup::Single(url),
            None => ContentLookup::All,
        }
    }
}

/// Content proxy reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentResponse {
    /// `{content}`; `null` when the story has no content block.
    Entry { content: Value },
    /// `{stories}` exactly as Storyblok listed them.
    Listing { stories: Vec<Story> },
}
