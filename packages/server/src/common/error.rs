//! Request-level error taxonomy and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Every way a pipeline can fail, mapped onto one HTTP status each.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input.
    #[error("{0}")]
    BadRequest(String),

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// A required credential is absent. Holds a description of *what* is
    /// missing, never a value.
    #[error("{0} not configured.")]
    Misconfigured(&'static str),

    /// Non-2xx (or no response at all) from a downstream provider. The
    /// downstream status, when there was one, is part of the message.
    #[error("{}", upstream_message(.provider, .status, .message))]
    UpstreamCall {
        provider: &'static str,
        status: Option<u16>,
        message: String,
    },

    /// 2xx whose body did not have the expected shape. `raw` holds the
    /// offending payload for diagnosis.
    #[error("{message}")]
    InvalidUpstreamResponse {
        message: String,
        raw: Option<String>,
    },

    #[error("{0}")]
    NotFound(String),
}

fn upstream_message(provider: &str, status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("{} API error ({}): {}", provider, status, message),
        None => message.to_string(),
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_api_output: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn invalid_upstream(message: impl Into<String>, raw: Option<String>) -> Self {
        ApiError::InvalidUpstreamResponse {
            message: message.into(),
            raw,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Misconfigured(_)
            | ApiError::UpstreamCall { .. }
            | ApiError::InvalidUpstreamResponse { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let raw_api_output = match self {
            ApiError::InvalidUpstreamResponse { raw, .. } => raw.clone(),
            _ => None,
        };
        ErrorBody {
            error: self.to_string(),
            raw_api_output,
        }
    }
}

impl From<gemini_client::GeminiError> for ApiError {
    fn from(err: gemini_client::GeminiError) -> Self {
        use gemini_client::GeminiError;
        match err {
            GeminiError::Api { status, message } => ApiError::UpstreamCall {
                provider: "Gemini",
                status: Some(status),
                message,
            },
            GeminiError::Parse { message, body } => ApiError::invalid_upstream(
                format!("Invalid response format from Gemini API: {}", message),
                Some(body),
            ),
            other => ApiError::UpstreamCall {
                provider: "Gemini",
                status: None,
                message: other.to_string(),
            },
        }
    }
}

impl From<storyblok_client::StoryblokError> for ApiError {
    fn from(err: storyblok_client::StoryblokError) -> Self {
        use storyblok_client::StoryblokError;
        match err {
            StoryblokError::Api { status, message } => ApiError::UpstreamCall {
                provider: "Storyblok",
                status: Some(status),
                message,
            },
            StoryblokError::Parse { message, body } => ApiError::invalid_upstream(
                format!("Invalid response format from Storyblok API: {}", message),
                Some(body),
            ),
            other => ApiError::UpstreamCall {
                provider: "Storyblok",
                status: None,
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let ApiError::UpstreamCall {
            provider,
            status: upstream_status,
            ..
        } = &self
        {
            tracing::error!(
                status = status.as_u16(),
                provider = *provider,
                upstream_status = ?upstream_status,
                error = %self,
                "Upstream call failed"
            );
        } else if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }
        (status, Json(self.body())).into_response()
    }
}
