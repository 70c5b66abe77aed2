//! Error types for Gemini client.

use thiserror::Error;

/// Result type for Gemini client operations.
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Gemini client errors.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response). `message` is taken from the provider's
    /// `{error: {message}}` envelope when present, else the raw body.
    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// 2xx whose body is not a `generateContent` envelope. `body` keeps the
    /// payload as received.
    #[error("Parse error: {message}")]
    Parse { message: String, body: String },
}

impl GeminiError {
    /// Whether repeating the same request could succeed.
    ///
    /// Only transport failures and 5xx responses qualify; a 4xx means the
    /// request itself is wrong and will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        match self {
            GeminiError::Network(_) => true,
            GeminiError::Api { status, .. } => *status >= 500,
            GeminiError::Config(_) | GeminiError::Parse { .. } => false,
        }
    }
}
