use serde::{Deserialize, Deserializer, Serialize};

/// Response of `GET /cdn/stories`.
#[derive(Debug, Clone, Deserialize)]
pub struct StoriesResponse {
    /// Missing and `null` both read as an empty listing.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub stories: Vec<Story>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Story>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Story>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single Storyblok story.
///
/// Kept as raw JSON so listings are relayed exactly as the API returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Story(pub serde_json::Value);

impl Story {
    /// The story's `content` block, if present.
    pub fn content(&self) -> Option<&serde_json::Value> {
        self.0.get("content")
    }

    pub fn full_slug(&self) -> Option<&str> {
        self.0.get("full_slug").and_then(|v| v.as_str())
    }
}

/// Query for the stories listing.
#[derive(Debug, Clone, Default)]
pub struct StoriesQuery {
    /// Only stories whose `full_slug` starts with this prefix.
    pub starts_with: Option<String>,
}

impl StoriesQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn starts_with(prefix: impl Into<String>) -> Self {
        Self {
            starts_with: Some(prefix.into()),
        }
    }
}
