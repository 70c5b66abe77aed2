//! Inbound audit request validation.

use lazy_static::lazy_static;
use regex::Regex;

use super::models::{AuditRequest, AuditSubject};
use crate::common::ApiError;

lazy_static! {
    /// Permissive URL syntax: optional http(s) scheme, a dotted DNS name with
    /// an alphabetic TLD or a dotted-quad IPv4 host, then optional port, path,
    /// query and fragment.
    static ref URL_PATTERN: Regex = Regex::new(
        r"(?i)^(https?://)?((([a-z\d]([a-z\d-]*[a-z\d])*)\.)+[a-z]{2,}|((\d{1,3}\.){3}\d{1,3}))(:\d+)?(/[-a-z\d%_.~+()',!*:@;=&$]*)*(\?[-;&a-z\d%_.~+=/?:@,()!*']*)?(#[-a-z\d_/?.~%=&+:()!,]*)?$"
    )
    .expect("URL pattern is a valid regex");
}

pub fn is_valid_url(candidate: &str) -> bool {
    URL_PATTERN.is_match(candidate)
}

impl AuditRequest {
    /// Validate the request and pick the audit subject. Blank fields count as absent.
    pub fn into_subject(self) -> Result<AuditSubject, ApiError> {
        let url = self.url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty());
        let html = self.html.filter(|h| !h.trim().is_empty());

        match (url, html) {
            (None, None) => Err(ApiError::bad_request("URL or HTML content is required.")),
            (Some(_), Some(_)) => Err(ApiError::bad_request(
                "Provide either a URL or HTML content, not both.",
            )),
            (Some(url), None) => {
                if is_valid_url(&url) {
                    Ok(AuditSubject::Url(url))
                } else {
                    Err(ApiError::bad_request("Invalid URL format."))
                }
            }
            (None, Some(html)) => Ok(AuditSubject::Html(html)),
        }
    }
}
