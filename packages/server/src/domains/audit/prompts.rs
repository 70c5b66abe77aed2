//! Prompt text for the audit pipeline.

use super::models::AuditSubject;

/// System instruction for the final audit call.
pub const AUDIT_SYSTEM_PROMPT: &str = "Analyze the provided content for accessibility issues. \
Evaluate it against common accessibility standards (WCAG 2.2). \
Respond with a single JSON object and nothing else: a numeric 'score' from 0 to 100, \
an array of strings 'critical_issues' for problems that block access, \
an array of strings 'warnings' for problems that degrade the experience, \
and a short 'summary' string. \
Every issue must be specific and actionable. Do not wrap the JSON in Markdown.";

/// Prompt for the grounding call that looks for existing reports on a URL.
pub fn grounding_prompt(url: &str) -> String {
    format!(
        "Search for an existing accessibility report, audit or review of the web page at {}. \
         List the accessibility issues it mentions, one per line. \
         If you find nothing, say so in one sentence.",
        url
    )
}

/// User turn for the final audit call.
pub fn audit_prompt(subject: &AuditSubject, grounding: Option<&str>) -> String {
    let mut prompt = match subject {
        AuditSubject::Url(url) => format!("Audit the web page at this URL: {}", url),
        AuditSubject::Html(html) => format!("Audit the following HTML content:\n\n{}", html),
    };

    if let Some(context) = grounding.map(str::trim).filter(|c| !c.is_empty()) {
        prompt.push_str("\n\nFindings from existing reports on this page:\n");
        prompt.push_str(context);
    }

    prompt
}
