use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub gemini: GeminiConfig,
    pub storyblok: StoryblokConfig,
    pub upstream_timeout: Duration,
    pub upstream_max_attempts: u32,
}

/// Audit pipeline settings. The pipeline is disabled when `api_key` is `None`.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub structured_output: bool,
    pub grounding: bool,
}

/// Content proxy settings. Both credentials are required for the pipeline.
#[derive(Clone)]
pub struct StoryblokConfig {
    pub space_id: Option<String>,
    pub preview_token: Option<String>,
    pub base_url: String,
    pub version: String,
}

// Credentials must never reach the logs, so Debug reports presence only.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("structured_output", &self.structured_output)
            .field("grounding", &self.grounding)
            .finish()
    }
}

impl std::fmt::Debug for StoryblokConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryblokConfig")
            .field("space_id", &self.space_id)
            .field("preview_token", &self.preview_token.as_ref().map(|_| "<set>"))
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            gemini: GeminiConfig {
                api_key: None,
                model: gemini_client::DEFAULT_MODEL.to_string(),
                base_url: gemini_client::DEFAULT_BASE_URL.to_string(),
                structured_output: true,
                grounding: true,
            },
            storyblok: StoryblokConfig {
                space_id: None,
                preview_token: None,
                base_url: storyblok_client::DEFAULT_BASE_URL.to_string(),
                version: storyblok_client::DEFAULT_VERSION.to_string(),
            },
            upstream_timeout: Duration::from_secs(30),
            upstream_max_attempts: 3,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let upstream_max_attempts: u32 = parse_or(&get, "UPSTREAM_MAX_ATTEMPTS", 3)?;
        if upstream_max_attempts == 0 {
            anyhow::bail!("UPSTREAM_MAX_ATTEMPTS must be at least 1");
        }

        Ok(Self {
            port: parse_or(&get, "PORT", defaults.port)?,
            gemini: GeminiConfig {
                api_key: get("GEMINI_API_KEY"),
                model: get("GEMINI_MODEL").unwrap_or(defaults.gemini.model),
                base_url: get("GEMINI_BASE_URL").unwrap_or(defaults.gemini.base_url),
                structured_output: parse_bool_or(&get, "AUDIT_STRUCTURED_OUTPUT", true)?,
                grounding: parse_bool_or(&get, "AUDIT_GROUNDING", true)?,
            },
            storyblok: StoryblokConfig {
                space_id: get("STORYBLOK_SPACE_ID"),
                preview_token: get("STORYBLOK_PREVIEW_TOKEN"),
                base_url: get("STORYBLOK_BASE_URL").unwrap_or(defaults.storyblok.base_url),
                version: get("STORYBLOK_VERSION").unwrap_or(defaults.storyblok.version),
            },
            upstream_timeout: Duration::from_secs(parse_or(&get, "UPSTREAM_TIMEOUT_SECS", 30)?),
            upstream_max_attempts,
        })
    }

    pub fn audit_enabled(&self) -> bool {
        self.gemini.api_key.is_some()
    }

    pub fn content_enabled(&self) -> bool {
        self.storyblok.space_id.is_some() && self.storyblok.preview_token.is_some()
    }

    /// Names of required-but-missing variables, per pipeline. Values are never included.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.gemini.api_key.is_none() {
            missing.push("GEMINI_API_KEY");
        }
        if self.storyblok.space_id.is_none() {
            missing.push("STORYBLOK_SPACE_ID");
        }
        if self.storyblok.preview_token.is_none() {
            missing.push("STORYBLOK_PREVIEW_TOKEN");
        }
        missing
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number", key)),
        None => Ok(default),
    }
}

fn parse_bool_or(get: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> Result<bool> {
    match get(key).map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(true),
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => Ok(false),
        Some(v) => anyhow::bail!("{} must be a boolean, got {:?}", key, v),
    }
}
