use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Inbound audit request. Exactly one of `url` / `html` must be given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
}

/// What is being audited, after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditSubject {
    Url(String),
    Html(String),
}

/// Accessibility audit result as relayed to the caller.
///
/// Keys are always snake_case on output. The model is occasionally prompted
/// into `criticalIssues`, which is accepted on input only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AuditResult {
    /// Accessibility score from 0 (unusable) to 100 (no issues found).
    pub score: f64,

    /// Issues that block access for some users. Specific and actionable.
    #[serde(alias = "criticalIssues")]
    pub critical_issues: Vec<String>,

    /// Problems that degrade the experience without blocking access.
    pub warnings: Vec<String>,

    /// One-paragraph overview of the page's accessibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Longer free-form report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
}

impl AuditResult {
    pub const MAX_SCORE: f64 = 100.0;

    /// Check invariants serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if !self.score.is_finite() || !(0.0..=Self::MAX_SCORE).contains(&self.score) {
            return Err(format!("score must be between 0 and 100, got {}", self.score));
        }
        Ok(())
    }
}

/// Knobs for the audit pipeline, taken from configuration at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditSettings {
    /// Send a `responseSchema` so the provider returns schema-conforming JSON.
    pub structured_output: bool,
    /// Run the search-grounding call before auditing a URL.
    pub grounding: bool,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            structured_output: true,
            grounding: true,
        }
    }
}
