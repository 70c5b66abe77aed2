use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoryblokError>;

#[derive(Debug, Error)]
pub enum StoryblokError {
    #[error("HTTP request failed: {0}")]
    Network(String),

    #[error("Storyblok API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// 2xx whose body is not a stories listing. `body` keeps the payload as received.
    #[error("Failed to parse Storyblok response: {message}")]
    Parse { message: String, body: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoryblokError {
    /// Transport failures and 5xx responses may succeed on a second attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            StoryblokError::Network(_) => true,
            StoryblokError::Api { status, .. } => *status >= 500,
            StoryblokError::Parse { .. } | StoryblokError::Config(_) => false,
        }
    }
}
