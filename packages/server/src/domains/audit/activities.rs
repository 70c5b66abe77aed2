//! Audit activity: validate, ground, audit, clean, parse.

use gemini_client::{GenerateContentRequest, StructuredOutput, Tool};
use tracing::{debug, info, warn};

use super::cleanup::{clean_model_json, parse_audit_result};
use super::models::{AuditRequest, AuditResult, AuditSubject};
use super::prompts::{audit_prompt, grounding_prompt, AUDIT_SYSTEM_PROMPT};
use crate::common::ApiError;
use crate::kernel::{with_retry, BaseAI, ServerDeps};

/// Run the full audit pipeline for one request.
pub async fn run_audit(deps: &ServerDeps, request: AuditRequest) -> Result<AuditResult, ApiError> {
    let subject = request.into_subject()?;

    let ai = deps
        .ai
        .as_ref()
        .ok_or(ApiError::Misconfigured("Gemini API key"))?;

    let grounding = match &subject {
        AuditSubject::Url(url) if deps.audit.grounding => ground(ai.as_ref(), url).await,
        _ => None,
    };

    let request = build_audit_request(&subject, grounding.as_deref(), deps.audit.structured_output);

    let response = with_retry(&deps.retry, "gemini.audit", || ai.generate_content(&request)).await?;

    let text = response.first_text().ok_or_else(|| {
        ApiError::invalid_upstream(
            "Invalid response format from Gemini API.",
            serde_json::to_string(&response).ok(),
        )
    })?;

    let result = parse_audit_result(clean_model_json(text))?;

    info!(
        subject = subject_kind(&subject),
        grounded = grounding.is_some(),
        score = result.score,
        critical_issues = result.critical_issues.len(),
        warnings = result.warnings.len(),
        "Audit completed"
    );

    Ok(result)
}

/// Best-effort search for existing reports on `url`.
///
/// Never fails: any problem is logged and the audit proceeds without context.
/// Single attempt, no retries.
pub async fn ground(ai: &dyn BaseAI, url: &str) -> Option<String> {
    let request = GenerateContentRequest::new(grounding_prompt(url)).tool(Tool::google_search());

    match ai.generate_content(&request).await {
        Ok(response) => match response.first_text().map(str::trim) {
            Some(text) if !text.is_empty() => {
                debug!(url, chars = text.len(), "Grounding context collected");
                Some(text.to_string())
            }
            _ => {
                warn!(url, "Grounding call returned no text, continuing without context");
                None
            }
        },
        Err(e) => {
            warn!(url, error = %e, "Grounding call failed, continuing without context");
            None
        }
    }
}

/// Build the final audit request.
pub fn build_audit_request(
    subject: &AuditSubject,
    grounding: Option<&str>,
    structured_output: bool,
) -> GenerateContentRequest {
    let request = GenerateContentRequest::new(audit_prompt(subject, grounding))
        .system(AUDIT_SYSTEM_PROMPT)
        .temperature(0.0);

    if structured_output {
        request.json_schema(AuditResult::gemini_schema())
    } else {
        request
    }
}

fn subject_kind(subject: &AuditSubject) -> &'static str {
    match subject {
        AuditSubject::Url(_) => "url",
        AuditSubject::Html(_) => "html",
    }
}
