//! Turning the model's text reply into an `AuditResult`.
//!
//! Providers do not reliably honour "return raw JSON only", so the reply may be
//! wrapped in a Markdown code fence and padded with whitespace.

use super::models::AuditResult;
use crate::common::ApiError;

const FENCE: &str = "```";

/// Strip surrounding whitespace and an optional Markdown code fence.
///
/// Handles ```` ```json ````/```` ```JSON ````/bare ```` ``` ```` openers, with or
/// without a newline after the opener and before the closer. Text without a
/// fence is only trimmed.
pub fn clean_model_json(text: &str) -> &str {
    let trimmed = text.trim();

    let body = match trimmed.strip_prefix(FENCE) {
        Some(rest) => rest
            .strip_prefix("json")
            .or_else(|| rest.strip_prefix("JSON"))
            .unwrap_or(rest),
        None => trimmed,
    };

    let body = body.trim_end();
    body.strip_suffix(FENCE).unwrap_or(body).trim()
}

/// Parse cleaned model output, keeping the raw text on any failure.
pub fn parse_audit_result(cleaned: &str) -> Result<AuditResult, ApiError> {
    let invalid = |message: String| ApiError::invalid_upstream(message, Some(cleaned.to_string()));

    let value: serde_json::Value = serde_json::from_str(cleaned).map_err(|e| {
        invalid(format!(
            "Failed to parse JSON from Gemini API response: {}",
            e
        ))
    })?;

    let result: AuditResult = serde_json::from_value(value).map_err(|e| {
        invalid(format!("Gemini API response has an unexpected shape: {}", e))
    })?;

    result
        .validate()
        .map_err(|e| invalid(format!("Gemini API response is out of range: {}", e)))?;

    Ok(result)
}
